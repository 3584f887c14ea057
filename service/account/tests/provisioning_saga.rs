use std::sync::Arc;

use anyhow::anyhow;
use uuid::Uuid;

use domain_account::{
    exception::AccountException,
    mock::{MockDealershipRepo, MockIdentityService, MockProfileRepo},
    model::entity::profile::{Profile, ProfileStatus, Role},
    service::{NewDealershipOwner, NewUser, ProvisioningService},
};
use service_account::ProvisioningServiceImpl;

fn service(
    dealership_repo: MockDealershipRepo,
    profile_repo: MockProfileRepo,
    identity_service: MockIdentityService,
) -> ProvisioningServiceImpl {
    ProvisioningServiceImpl::builder()
        .dealership_repo(Arc::new(dealership_repo))
        .profile_repo(Arc::new(profile_repo))
        .identity_service(Arc::new(identity_service))
        .build()
}

fn owner_request() -> NewDealershipOwner {
    NewDealershipOwner {
        dealership_name: "Sunrise RV".into(),
        owner_name: "Pat Ellison".into(),
        email: "pat@sunrise-rv.example".into(),
        password: "hunter22".into(),
    }
}

fn user_request(dealership_id: Uuid) -> NewUser {
    NewUser {
        email: "tech@sunrise-rv.example".into(),
        password: "hunter22".into(),
        name: "Riley Burke".into(),
        role: "technician".into(),
        dealership_id,
    }
}

fn caller(role: Role, dealership_id: Uuid) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        dealership_id,
        name: "Pat Ellison".into(),
        email: "pat@sunrise-rv.example".into(),
        role,
        status: ProfileStatus::Active,
    }
}

fn upstream() -> AccountException {
    AccountException::IdentityUpstream {
        retryable: false,
        source: anyhow!("email already registered"),
    }
}

#[tokio::test]
async fn owner_signup_creates_all_three_records() {
    let identity_id = Uuid::new_v4();

    let mut dealership_repo = MockDealershipRepo::new();
    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    dealership_repo
        .expect_insert()
        .withf(|dealership| {
            dealership.name == "Sunrise RV"
                && dealership.default_labor_rate == 85.into()
                && dealership.parts_markup_percent.is_zero()
                && !dealership.technicians_see_pricing
        })
        .times(1)
        .returning(|_| Ok(()));
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(move |_, _| Ok(identity_id));
    profile_repo
        .expect_insert()
        .withf(move |profile| {
            profile.id == identity_id
                && profile.role == Role::Owner
                && profile.status == ProfileStatus::Active
        })
        .times(1)
        .returning(|_| Ok(()));

    let provisioned = service(dealership_repo, profile_repo, identity_service)
        .create_dealership_owner(owner_request())
        .await
        .unwrap();
    assert_eq!(provisioned.user.id, identity_id);
    assert_eq!(provisioned.user.dealership_id, provisioned.dealership_id);
}

#[tokio::test]
async fn identity_failure_rolls_back_the_dealership() {
    let mut dealership_repo = MockDealershipRepo::new();
    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    let created = std::sync::Arc::new(std::sync::Mutex::new(None));
    let created_clone = created.clone();
    dealership_repo.expect_insert().times(1).returning(move |dealership| {
        *created_clone.lock().unwrap() = Some(dealership.id);
        Ok(())
    });
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(|_, _| Err(upstream()));
    let created_clone = created.clone();
    dealership_repo
        .expect_delete_by_id()
        .withf(move |id| Some(*id) == *created_clone.lock().unwrap())
        .times(1)
        .returning(|_| Ok(true));
    profile_repo.expect_insert().times(0);

    let result = service(dealership_repo, profile_repo, identity_service)
        .create_dealership_owner(owner_request())
        .await;
    assert!(matches!(
        result,
        Err(AccountException::IdentityUpstream { .. })
    ));
}

#[tokio::test]
async fn profile_failure_rolls_back_identity_then_dealership() {
    let identity_id = Uuid::new_v4();

    let mut dealership_repo = MockDealershipRepo::new();
    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    dealership_repo.expect_insert().times(1).returning(|_| Ok(()));
    dealership_repo.expect_delete_by_id().times(1).returning(|_| Ok(true));
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(move |_, _| Ok(identity_id));
    identity_service
        .expect_delete_identity()
        .withf(move |id| *id == identity_id)
        .times(1)
        .returning(|_| Ok(()));
    profile_repo
        .expect_insert()
        .times(1)
        .returning(|_| Err(anyhow!("unique constraint violated")));

    let result = service(dealership_repo, profile_repo, identity_service)
        .create_dealership_owner(owner_request())
        .await;
    assert!(matches!(result, Err(AccountException::InternalError { .. })));
}

#[tokio::test]
async fn failed_compensation_keeps_the_original_error() {
    let mut dealership_repo = MockDealershipRepo::new();
    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    dealership_repo.expect_insert().times(1).returning(|_| Ok(()));
    // Both compensations fail; the caller still sees the profile error.
    dealership_repo
        .expect_delete_by_id()
        .times(1)
        .returning(|_| Err(anyhow!("connection reset")));
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(|_, _| Ok(Uuid::new_v4()));
    identity_service
        .expect_delete_identity()
        .times(1)
        .returning(|_| Err(upstream()));
    profile_repo
        .expect_insert()
        .times(1)
        .returning(|_| Err(anyhow!("unique constraint violated")));

    let result = service(dealership_repo, profile_repo, identity_service)
        .create_dealership_owner(owner_request())
        .await;
    assert!(matches!(result, Err(AccountException::InternalError { .. })));
}

#[tokio::test]
async fn short_password_is_rejected_before_any_write() {
    let mut dealership_repo = MockDealershipRepo::new();
    dealership_repo.expect_insert().times(0);

    let mut request = owner_request();
    request.password = "four".into();
    let result = service(dealership_repo, MockProfileRepo::new(), MockIdentityService::new())
        .create_dealership_owner(request)
        .await;
    assert!(matches!(
        result,
        Err(AccountException::PasswordTooShort { min: 6 })
    ));
}

#[tokio::test]
async fn technician_cannot_create_users() {
    let dealership_id = Uuid::new_v4();

    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    let requester = caller(Role::Technician, dealership_id);
    profile_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(requester)));
    identity_service.expect_create_identity().times(0);
    profile_repo.expect_insert().times(0);

    let result = service(MockDealershipRepo::new(), profile_repo, identity_service)
        .create_user(user_request(dealership_id), Uuid::new_v4())
        .await;
    assert!(matches!(
        result,
        Err(AccountException::CapabilityNotGranted { .. })
    ));
}

#[tokio::test]
async fn owner_of_another_dealership_is_rejected() {
    let mut profile_repo = MockProfileRepo::new();
    let requester = caller(Role::Owner, Uuid::new_v4());
    profile_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(requester)));
    profile_repo.expect_insert().times(0);

    let result = service(MockDealershipRepo::new(), profile_repo, MockIdentityService::new())
        .create_user(user_request(Uuid::new_v4()), Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(AccountException::WrongDealership)));
}

#[tokio::test]
async fn unknown_role_is_a_validation_failure() {
    let mut profile_repo = MockProfileRepo::new();
    profile_repo.expect_find_by_id().times(0);

    let mut request = user_request(Uuid::new_v4());
    request.role = "janitor".into();
    let result = service(MockDealershipRepo::new(), profile_repo, MockIdentityService::new())
        .create_user(request, Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(AccountException::InvalidRole { .. })));
}

#[tokio::test]
async fn owner_creates_a_technician() {
    let dealership_id = Uuid::new_v4();
    let identity_id = Uuid::new_v4();

    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    let requester = caller(Role::Owner, dealership_id);
    let requester_id = requester.id;
    profile_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(requester)));
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(move |_, _| Ok(identity_id));
    profile_repo
        .expect_insert()
        .withf(move |profile| {
            profile.id == identity_id
                && profile.dealership_id == dealership_id
                && profile.role == Role::Technician
        })
        .times(1)
        .returning(|_| Ok(()));

    let created = service(MockDealershipRepo::new(), profile_repo, identity_service)
        .create_user(user_request(dealership_id), requester_id)
        .await
        .unwrap();
    assert_eq!(created.status, ProfileStatus::Active);
}

#[tokio::test]
async fn profile_failure_during_create_user_deletes_the_identity() {
    let dealership_id = Uuid::new_v4();
    let identity_id = Uuid::new_v4();

    let mut profile_repo = MockProfileRepo::new();
    let mut identity_service = MockIdentityService::new();
    let requester = caller(Role::Owner, dealership_id);
    profile_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(requester)));
    identity_service
        .expect_create_identity()
        .times(1)
        .returning(move |_, _| Ok(identity_id));
    identity_service
        .expect_delete_identity()
        .withf(move |id| *id == identity_id)
        .times(1)
        .returning(|_| Ok(()));
    profile_repo
        .expect_insert()
        .times(1)
        .returning(|_| Err(anyhow!("unique constraint violated")));

    let result = service(MockDealershipRepo::new(), profile_repo, identity_service)
        .create_user(user_request(dealership_id), Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(AccountException::InternalError { .. })));
}
