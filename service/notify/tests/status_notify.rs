use std::sync::{Arc, Mutex};

use uuid::Uuid;

use domain_account::{
    mock::MockProfileRepo,
    model::entity::profile::{Profile, ProfileStatus, Role},
};
use domain_notify::{
    mock::MockNotificationRepo,
    model::entity::notification::{Notification, NotificationKind},
    service::StatusNotifyService,
};
use domain_work_order::model::{entity::work_order::WorkOrderStatus, vo::msg::StatusChangeMsg};
use service_notify::StatusNotifyServiceImpl;

fn staff(role: Role, dealership_id: Uuid) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        dealership_id,
        name: "Staff".into(),
        email: format!("{}@sunrise-rv.example", Uuid::new_v4()),
        role,
        status: ProfileStatus::Active,
    }
}

fn msg(status: WorkOrderStatus, technician_id: Option<Uuid>) -> StatusChangeMsg {
    StatusChangeMsg {
        work_order_id: Uuid::new_v4(),
        dealership_id: Uuid::new_v4(),
        technician_id,
        status,
    }
}

fn capture(
    notification_repo: &mut MockNotificationRepo,
) -> Arc<Mutex<Vec<Notification>>> {
    let created = Arc::new(Mutex::new(Vec::new()));
    let captured = created.clone();
    notification_repo.expect_insert().returning(move |notification| {
        captured.lock().unwrap().push(notification.clone());
        Ok(())
    });
    created
}

fn service(
    profile_repo: MockProfileRepo,
    notification_repo: MockNotificationRepo,
) -> StatusNotifyServiceImpl {
    StatusNotifyServiceImpl::builder()
        .profile_repo(Arc::new(profile_repo))
        .notification_repo(Arc::new(notification_repo))
        .build()
}

#[tokio::test]
async fn submission_notifies_each_owner_and_manager_once() {
    let message = msg(WorkOrderStatus::Submitted, None);
    let managers = vec![
        staff(Role::Owner, message.dealership_id),
        staff(Role::Manager, message.dealership_id),
    ];
    let expected_ids: Vec<Uuid> = managers.iter().map(|profile| profile.id).collect();

    let mut profile_repo = MockProfileRepo::new();
    let mut notification_repo = MockNotificationRepo::new();
    profile_repo
        .expect_list_active_in_roles()
        .withf(|_, roles| roles == [Role::Owner, Role::Manager])
        .return_once(move |_, _| Ok(managers));
    let created = capture(&mut notification_repo);

    service(profile_repo, notification_repo)
        .handle(message.clone())
        .await
        .unwrap();

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 2);
    for notification in created.iter() {
        assert!(expected_ids.contains(&notification.user_id));
        assert_eq!(notification.kind, NotificationKind::WorkOrderSubmitted);
        assert_eq!(notification.work_order_id, Some(message.work_order_id));
        assert!(!notification.read);
    }
}

#[tokio::test]
async fn approval_notifies_the_assigned_technician() {
    let technician_id = Uuid::new_v4();
    let message = msg(WorkOrderStatus::Approved, Some(technician_id));

    let mut notification_repo = MockNotificationRepo::new();
    let created = capture(&mut notification_repo);

    service(MockProfileRepo::new(), notification_repo)
        .handle(message)
        .await
        .unwrap();

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, technician_id);
    assert_eq!(created[0].kind, NotificationKind::WorkOrderApproved);
}

#[tokio::test]
async fn rejection_without_technician_notifies_nobody() {
    let mut notification_repo = MockNotificationRepo::new();
    notification_repo.expect_insert().times(0);

    service(MockProfileRepo::new(), notification_repo)
        .handle(msg(WorkOrderStatus::Rejected, None))
        .await
        .unwrap();
}

#[tokio::test]
async fn customer_decision_notifies_management() {
    let message = msg(WorkOrderStatus::CustomerRejected, Some(Uuid::new_v4()));
    let owner = staff(Role::Owner, message.dealership_id);
    let owner_id = owner.id;

    let mut profile_repo = MockProfileRepo::new();
    let mut notification_repo = MockNotificationRepo::new();
    profile_repo
        .expect_list_active_in_roles()
        .return_once(move |_, _| Ok(vec![owner]));
    let created = capture(&mut notification_repo);

    service(profile_repo, notification_repo)
        .handle(message)
        .await
        .unwrap();

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, owner_id);
    assert_eq!(created[0].kind, NotificationKind::CustomerRejected);
}

#[tokio::test]
async fn non_notifying_states_are_ignored() {
    let mut notification_repo = MockNotificationRepo::new();
    notification_repo.expect_insert().times(0);

    service(MockProfileRepo::new(), notification_repo)
        .handle(msg(WorkOrderStatus::PendingCustomerApproval, None))
        .await
        .unwrap();
}
