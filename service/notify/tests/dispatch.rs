use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_account::{mock::MockDealershipRepo, model::entity::Dealership};
use domain_notify::{
    exception::NotifyException,
    mock::{MockEmailSender, MockSmsSender},
    service::ApprovalDispatchService,
};
use domain_work_order::{
    exception::WorkOrderException,
    mock::{MockApprovalService, MockCustomerRepo, MockRvRepo, MockWorkOrderRepo},
    model::{
        entity::{
            work_order::{WorkOrder, WorkOrderPart, WorkOrderStatus},
            Customer, Rv,
        },
        vo::{DeliveryMethod, IssuedApproval},
    },
};
use service_notify::ApprovalDispatchServiceImpl;

struct Fixture {
    approval_service: MockApprovalService,
    work_order_repo: MockWorkOrderRepo,
    customer_repo: MockCustomerRepo,
    rv_repo: MockRvRepo,
    dealership_repo: MockDealershipRepo,
    sms_sender: MockSmsSender,
    email_sender: MockEmailSender,
}

impl Fixture {
    fn new() -> Self {
        Self {
            approval_service: MockApprovalService::new(),
            work_order_repo: MockWorkOrderRepo::new(),
            customer_repo: MockCustomerRepo::new(),
            rv_repo: MockRvRepo::new(),
            dealership_repo: MockDealershipRepo::new(),
            sms_sender: MockSmsSender::new(),
            email_sender: MockEmailSender::new(),
        }
    }

    fn service(self) -> ApprovalDispatchServiceImpl {
        ApprovalDispatchServiceImpl::builder()
            .approval_service(Arc::new(self.approval_service))
            .work_order_repo(Arc::new(self.work_order_repo))
            .customer_repo(Arc::new(self.customer_repo))
            .rv_repo(Arc::new(self.rv_repo))
            .dealership_repo(Arc::new(self.dealership_repo))
            .sms_sender(Arc::new(self.sms_sender))
            .email_sender(Arc::new(self.email_sender))
            .base_url("https://portal.example/".to_string())
            .build()
    }

    /// Wires up a resolvable order/customer/rv/dealership graph and an
    /// approval service issuing `token`.
    fn with_graph(&mut self, token: &str) -> Uuid {
        let dealership_id = Uuid::new_v4();
        let order = order(dealership_id);
        let order_id = order.id;
        let customer_id = order.customer_id;
        let rv_id = order.rv_id;

        self.work_order_repo
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(order)));
        self.customer_repo.expect_find_by_id().return_once(move |_| {
            Ok(Some(Customer {
                id: customer_id,
                dealership_id,
                name: "Dana Whitfield".into(),
                email: "dana@example.com".into(),
                phone: "5550147".into(),
            }))
        });
        self.rv_repo.expect_find_by_id().return_once(move |_| {
            Ok(Some(Rv {
                id: rv_id,
                customer_id,
                year: 2021,
                make: "Winnebago".into(),
                model: "Vista".into(),
                vin: "1FDXE4FS8MDC00000".into(),
                nickname: None,
                notes: None,
            }))
        });
        self.dealership_repo.expect_find_by_id().return_once(move |_| {
            Ok(Some(Dealership {
                id: dealership_id,
                name: "Sunrise RV".into(),
                phone: None,
                email: None,
                default_labor_rate: Decimal::from(85),
                currency_symbol: "$".into(),
                default_terms: None,
                parts_markup_percent: Decimal::ZERO,
                technicians_see_pricing: false,
            }))
        });
        let token = token.to_string();
        self.approval_service.expect_issue().times(1).return_once(move |_, _| {
            Ok(IssuedApproval {
                token,
                expires_at: Utc::now() + Duration::days(7),
            })
        });
        order_id
    }
}

fn order(dealership_id: Uuid) -> WorkOrder {
    let now = Utc::now();
    WorkOrder {
        id: Uuid::new_v4(),
        dealership_id,
        rv_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        issue_description: "Roof seal reseat".into(),
        photos: vec![],
        parts: vec![WorkOrderPart {
            part_id: Uuid::new_v4(),
            name: "Sealant kit".into(),
            unit_price: "274.40".parse().unwrap(),
            quantity: 1,
        }],
        labor_hours: "2.5".parse().unwrap(),
        labor_rate: "145".parse().unwrap(),
        status: WorkOrderStatus::Approved,
        technician_notes: None,
        manager_notes: None,
        technician_id: None,
        total_estimate: "636.90".parse().unwrap(),
        approval_token: None,
        approval_token_expires_at: None,
        customer_notes: None,
        approved_at: None,
        rejected_at: None,
        created_time: now,
        last_modified_time: now,
    }
}

#[tokio::test]
async fn sms_dispatch_sends_the_approval_link() {
    let mut fixture = Fixture::new();
    let order_id = fixture.with_graph("tok-123");

    let bodies = Arc::new(Mutex::new(Vec::new()));
    let captured = bodies.clone();
    fixture.sms_sender.expect_send().times(1).returning(move |to, body| {
        captured.lock().unwrap().push((to.to_string(), body.to_string()));
        Ok(())
    });

    let receipt = fixture
        .service()
        .send_for_approval(order_id, DeliveryMethod::Sms)
        .await
        .unwrap();

    assert_eq!(receipt.token, "tok-123");
    assert!(receipt.delivery_warning.is_none());
    let sent = bodies.lock().unwrap();
    assert_eq!(sent[0].0, "5550147");
    assert!(sent[0].1.contains("https://portal.example/approve/tok-123"));
    assert!(sent[0].1.contains("Sunrise RV"));
}

#[tokio::test]
async fn email_dispatch_renders_the_estimate() {
    let mut fixture = Fixture::new();
    let order_id = fixture.with_graph("tok-456");

    let messages = Arc::new(Mutex::new(Vec::new()));
    let captured = messages.clone();
    fixture.email_sender.expect_send().times(1).returning(move |message| {
        captured.lock().unwrap().push(message.clone());
        Ok(())
    });

    let receipt = fixture
        .service()
        .send_for_approval(order_id, DeliveryMethod::Email)
        .await
        .unwrap();

    assert!(receipt.delivery_warning.is_none());
    let sent = messages.lock().unwrap();
    assert_eq!(sent[0].to, "dana@example.com");
    assert_eq!(sent[0].subject, "Service Estimate Ready - Sunrise RV");
    assert!(sent[0].html_body.contains("https://portal.example/approve/tok-456"));
    assert!(sent[0].html_body.contains("$636.90"));
    assert!(sent[0].html_body.contains("2021 Winnebago Vista"));
}

#[tokio::test]
async fn delivery_failure_keeps_the_issued_token() {
    let mut fixture = Fixture::new();
    let order_id = fixture.with_graph("tok-789");
    fixture.sms_sender.expect_send().times(1).returning(|_, _| {
        Err(NotifyException::DeliveryFailed {
            method: DeliveryMethod::Sms,
            reason: "gateway timeout".into(),
        })
    });

    let receipt = fixture
        .service()
        .send_for_approval(order_id, DeliveryMethod::Sms)
        .await
        .unwrap();

    // The send failed but issuance stands: the caller gets the token plus a
    // warning instead of an error.
    assert_eq!(receipt.token, "tok-789");
    assert!(receipt.delivery_warning.unwrap().contains("gateway timeout"));
}

#[tokio::test]
async fn unknown_work_order_is_not_found() {
    let mut fixture = Fixture::new();
    fixture.work_order_repo.expect_find_by_id().return_once(|_| Ok(None));
    fixture.approval_service.expect_issue().times(0);

    let result = fixture
        .service()
        .send_for_approval(Uuid::new_v4(), DeliveryMethod::Sms)
        .await;
    assert!(matches!(
        result,
        Err(NotifyException::WorkOrder(
            WorkOrderException::WorkOrderNotFound { .. }
        ))
    ));
}
