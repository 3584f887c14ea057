use std::sync::Arc;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_account::service::{NewDealershipOwner, ProvisioningService};
use domain_notify::{
    model::entity::notification::NotificationKind, repository::NotificationRepo,
    service::ApprovalDispatchService,
};
use domain_work_order::{
    exception::WorkOrderException,
    model::{
        entity::{approval_log::ApprovalAction, work_order::WorkOrderStatus, Customer, Part, Rv},
        vo::{
            CustomerDecision, DeliveryMethod, NewWorkOrder, RequestedPart, RequesterMeta,
            WorkOrderPatch,
        },
    },
    repository::{ApprovalLogRepo, WorkOrderRepo},
    service::{ApprovalService, ReportService, WorkOrderService},
};
use service_management_system::config::AppConfig;
use service_management_system::infrastructure::ServiceProvider;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

struct Env {
    provider: Arc<ServiceProvider>,
    dealership_id: Uuid,
    owner_id: Uuid,
    customer_id: Uuid,
    rv_id: Uuid,
    part_id: Uuid,
}

/// Memory-mode provider with one dealership (12% markup), one customer, one
/// RV and a $245 catalog part; the status consumer runs in the background.
async fn build_env() -> Env {
    let provider = Arc::new(ServiceProvider::build(AppConfig::default()).await.unwrap());
    for service in provider.background_services() {
        tokio::spawn(async move { service.run().await });
    }

    let owner = provider
        .provisioning_service
        .create_dealership_owner(NewDealershipOwner {
            dealership_name: "Sunrise RV".into(),
            owner_name: "Pat Ellison".into(),
            email: "pat@sunrise-rv.example".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();

    let mut dealership = provider
        .dealership_repo
        .find_by_id(owner.dealership_id)
        .await
        .unwrap()
        .unwrap();
    dealership.parts_markup_percent = dec("12");
    provider.dealership_repo.update(&dealership).await.unwrap();

    let customer = Customer {
        id: Uuid::new_v4(),
        dealership_id: owner.dealership_id,
        name: "Dana Whitfield".into(),
        email: "dana@example.com".into(),
        phone: "5550147000".into(),
    };
    provider.customer_repo.insert(&customer).await.unwrap();

    let rv = Rv {
        id: Uuid::new_v4(),
        customer_id: customer.id,
        year: 2021,
        make: "Winnebago".into(),
        model: "Vista".into(),
        vin: "1FDXE4FS8MDC00000".into(),
        nickname: None,
        notes: None,
    };
    provider.rv_repo.insert(&rv).await.unwrap();

    let part = Part {
        id: Uuid::new_v4(),
        dealership_id: owner.dealership_id,
        name: "Water pump".into(),
        sku: Some("WP-245".into()),
        description: None,
        price: dec("245"),
        in_stock_qty: 3,
    };
    provider.part_repo.insert(&part).await.unwrap();

    Env {
        provider,
        dealership_id: owner.dealership_id,
        owner_id: owner.user.id,
        customer_id: customer.id,
        rv_id: rv.id,
        part_id: part.id,
    }
}

fn order_request(env: &Env, status: WorkOrderStatus) -> NewWorkOrder {
    NewWorkOrder {
        rv_id: env.rv_id,
        customer_id: env.customer_id,
        issue_description: "Water pump rattles at idle".into(),
        photos: vec!["work-orders/photo-1.jpg".into()],
        parts: vec![RequestedPart {
            part_id: env.part_id,
            name: "Water pump".into(),
            unit_price: dec("245"),
            quantity: 1,
        }],
        labor_hours: dec("2.5"),
        labor_rate: Some(dec("145")),
        status,
        technician_notes: None,
        manager_notes: None,
        technician_id: None,
    }
}

fn meta() -> RequesterMeta {
    RequesterMeta {
        ip_address: Some("203.0.113.9".into()),
        user_agent: Some("Mozilla/5.0".into()),
    }
}

fn status_patch(status: WorkOrderStatus) -> WorkOrderPatch {
    WorkOrderPatch {
        status: Some(status),
        ..Default::default()
    }
}

#[tokio::test]
async fn full_lifecycle_with_customer_approval() {
    let env = build_env().await;
    let sp = &env.provider;

    // $245 part with 12% markup plus 2.5h at $145/h.
    let order = sp
        .work_order_service
        .create(env.dealership_id, order_request(&env, WorkOrderStatus::Draft))
        .await
        .unwrap();
    assert_eq!(order.parts[0].unit_price, dec("274.40"));
    assert_eq!(order.total_estimate, dec("636.90"));

    sp.work_order_service
        .update(order.id, status_patch(WorkOrderStatus::Submitted))
        .await
        .unwrap();
    sp.work_order_service
        .update(order.id, status_patch(WorkOrderStatus::Approved))
        .await
        .unwrap();

    let receipt = sp
        .approval_dispatch_service
        .send_for_approval(order.id, DeliveryMethod::Email)
        .await
        .unwrap();
    assert!(receipt.delivery_warning.is_none());

    let pending = sp.work_order_service.get(order.id).await.unwrap();
    assert_eq!(pending.status, WorkOrderStatus::PendingCustomerApproval);
    assert_eq!(pending.approval_token.as_deref(), Some(receipt.token.as_str()));

    let status = sp
        .approval_service
        .finalize(
            &receipt.token,
            CustomerDecision::Approve,
            Some("Go ahead".into()),
            meta(),
        )
        .await
        .unwrap();
    assert_eq!(status, WorkOrderStatus::CustomerApproved);

    let decided = sp.work_order_service.get(order.id).await.unwrap();
    assert_eq!(decided.status, WorkOrderStatus::CustomerApproved);
    assert!(decided.approved_at.is_some());
    assert_eq!(decided.customer_notes.as_deref(), Some("Go ahead"));

    let actions: Vec<ApprovalAction> = sp
        .approval_log_repo
        .list_by_work_order(order.id)
        .await
        .unwrap()
        .iter()
        .map(|entry| entry.action)
        .collect();
    assert!(actions.contains(&ApprovalAction::Sent));
    assert!(actions.contains(&ApprovalAction::Approved));

    // Let the status consumer drain the queue.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let kinds: Vec<NotificationKind> = sp
        .notification_repo
        .list_by_user(env.owner_id)
        .await
        .unwrap()
        .iter()
        .map(|notification| notification.kind)
        .collect();
    assert!(kinds.contains(&NotificationKind::WorkOrderSubmitted));
    assert!(kinds.contains(&NotificationKind::CustomerApproved));
}

#[tokio::test]
async fn expired_token_finalize_changes_nothing() {
    let env = build_env().await;
    let sp = &env.provider;

    let order = sp
        .work_order_service
        .create(env.dealership_id, order_request(&env, WorkOrderStatus::Draft))
        .await
        .unwrap();

    // Issue, then age the token past its seven days.
    sp.approval_service.issue(order.id, DeliveryMethod::Sms).await.unwrap();
    sp.work_order_repo
        .set_approval_token(order.id, "aged-token", Utc::now() - Duration::days(1))
        .await
        .unwrap();

    let result = sp
        .approval_service
        .finalize("aged-token", CustomerDecision::Approve, None, meta())
        .await;
    assert!(matches!(result, Err(WorkOrderException::TokenExpired { .. })));

    let untouched = sp.work_order_service.get(order.id).await.unwrap();
    assert_eq!(untouched.status, WorkOrderStatus::PendingCustomerApproval);
    assert!(untouched.approved_at.is_none());

    let actions: Vec<ApprovalAction> = sp
        .approval_log_repo
        .list_by_work_order(order.id)
        .await
        .unwrap()
        .iter()
        .map(|entry| entry.action)
        .collect();
    assert!(!actions.contains(&ApprovalAction::Approved));
    assert!(!actions.contains(&ApprovalAction::Rejected));
}

#[tokio::test]
async fn double_finalize_has_exactly_one_winner() {
    let env = build_env().await;
    let sp = &env.provider;

    let order = sp
        .work_order_service
        .create(env.dealership_id, order_request(&env, WorkOrderStatus::Draft))
        .await
        .unwrap();
    let issued = sp.approval_service.issue(order.id, DeliveryMethod::Sms).await.unwrap();

    // A double-clicked approval link: both submissions race on one token.
    let (first, second) = tokio::join!(
        sp.approval_service
            .finalize(&issued.token, CustomerDecision::Approve, None, meta()),
        sp.approval_service
            .finalize(&issued.token, CustomerDecision::Approve, None, meta()),
    );

    let results = [first, second];
    let winners = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .any(|result| matches!(result, Err(WorkOrderException::AlreadyProcessed))));

    let decided = sp.work_order_service.get(order.id).await.unwrap();
    assert_eq!(decided.status, WorkOrderStatus::CustomerApproved);
}

#[tokio::test]
async fn order_lines_are_isolated_from_catalog_changes() {
    let env = build_env().await;
    let sp = &env.provider;

    let order = sp
        .work_order_service
        .create(env.dealership_id, order_request(&env, WorkOrderStatus::Draft))
        .await
        .unwrap();
    assert_eq!(order.parts[0].unit_price, dec("274.40"));

    // Reprice the catalog part after the snapshot was taken.
    let mut part = sp.part_repo.find_by_id(env.part_id).await.unwrap().unwrap();
    part.price = dec("999");
    sp.part_repo.update(&part).await.unwrap();

    let unchanged = sp.work_order_service.get(order.id).await.unwrap();
    assert_eq!(unchanged.parts[0].unit_price, dec("274.40"));

    // Recomputation after a labor tweak still uses the snapshot price.
    let retotaled = sp
        .work_order_service
        .update(
            order.id,
            WorkOrderPatch {
                labor_hours: Some(dec("3")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(retotaled.total_estimate, dec("274.40") + dec("435.00"));
}

#[tokio::test]
async fn completed_orders_roll_up_into_monthly_revenue() {
    let env = build_env().await;
    let sp = &env.provider;

    for _ in 0..2 {
        let order = sp
            .work_order_service
            .create(env.dealership_id, order_request(&env, WorkOrderStatus::Draft))
            .await
            .unwrap();
        sp.work_order_service
            .force_set_status(order.id, WorkOrderStatus::Completed)
            .await
            .unwrap();
    }

    let now = Utc::now();
    let report = sp
        .report_service
        .revenue_by_month(env.dealership_id, now - Duration::days(30), now + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].order_count, 2);
    assert_eq!(report[0].revenue, dec("1273.80"));
}
