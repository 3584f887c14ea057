mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use common::{dealership, dec, work_order, CapturingProducer};
use domain_account::mock::MockDealershipRepo;
use domain_work_order::{
    exception::WorkOrderException,
    mock::{MockCustomerRepo, MockPartRepo, MockRvRepo, MockWorkOrderRepo},
    model::{
        entity::{work_order::WorkOrderStatus, Customer, Part, Rv},
        vo::{NewWorkOrder, RequestedPart, WorkOrderPatch},
    },
    service::WorkOrderService,
};
use service_work_order::WorkOrderServiceImpl;

struct Fixture {
    work_order_repo: MockWorkOrderRepo,
    part_repo: MockPartRepo,
    customer_repo: MockCustomerRepo,
    rv_repo: MockRvRepo,
    dealership_repo: MockDealershipRepo,
    producer: Arc<CapturingProducer>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            work_order_repo: MockWorkOrderRepo::new(),
            part_repo: MockPartRepo::new(),
            customer_repo: MockCustomerRepo::new(),
            rv_repo: MockRvRepo::new(),
            dealership_repo: MockDealershipRepo::new(),
            producer: Arc::new(CapturingProducer::default()),
        }
    }

    fn service(self) -> (WorkOrderServiceImpl, Arc<CapturingProducer>) {
        let producer = self.producer.clone();
        let service = WorkOrderServiceImpl::builder()
            .work_order_repo(Arc::new(self.work_order_repo))
            .part_repo(Arc::new(self.part_repo))
            .customer_repo(Arc::new(self.customer_repo))
            .rv_repo(Arc::new(self.rv_repo))
            .dealership_repo(Arc::new(self.dealership_repo))
            .status_mq_producer(self.producer)
            .status_mq_topic("work-order-status".to_string())
            .build();
        (service, producer)
    }
}

fn customer(id: Uuid, dealership_id: Uuid) -> Customer {
    Customer {
        id,
        dealership_id,
        name: "Dana Whitfield".into(),
        email: "dana@example.com".into(),
        phone: "5550147".into(),
    }
}

fn rv(id: Uuid, customer_id: Uuid) -> Rv {
    Rv {
        id,
        customer_id,
        year: 2021,
        make: "Winnebago".into(),
        model: "Vista".into(),
        vin: "1FDXE4FS8MDC00000".into(),
        nickname: None,
        notes: None,
    }
}

fn new_order(customer_id: Uuid, rv_id: Uuid, parts: Vec<RequestedPart>) -> NewWorkOrder {
    NewWorkOrder {
        rv_id,
        customer_id,
        issue_description: "Water pump rattles at idle".into(),
        photos: vec![],
        parts,
        labor_hours: dec("2.5"),
        labor_rate: Some(dec("145")),
        status: WorkOrderStatus::Draft,
        technician_notes: None,
        manager_notes: None,
        technician_id: None,
    }
}

#[tokio::test]
async fn create_applies_markup_and_computes_total() {
    let settings = dealership("12");
    let dealership_id = settings.id;
    let customer_id = Uuid::new_v4();
    let rv_id = Uuid::new_v4();
    let part_id = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .customer_repo
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(customer(id, dealership_id))));
    fixture
        .rv_repo
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(rv(id, customer_id))));
    fixture
        .dealership_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(settings)));
    fixture.part_repo.expect_find_by_id().return_once(move |id| {
        Ok(Some(Part {
            id,
            dealership_id,
            name: "Water pump".into(),
            sku: Some("WP-245".into()),
            description: None,
            price: dec("245"),
            in_stock_qty: 3,
        }))
    });
    fixture.work_order_repo.expect_insert().times(1).returning(|_| Ok(()));

    let (service, producer) = fixture.service();
    let created = service
        .create(
            dealership_id,
            new_order(
                customer_id,
                rv_id,
                vec![RequestedPart {
                    part_id,
                    name: "Water pump".into(),
                    unit_price: dec("199"),
                    quantity: 1,
                }],
            ),
        )
        .await
        .unwrap();

    assert_eq!(created.parts[0].unit_price, dec("274.40"));
    assert_eq!(created.total_estimate, dec("636.90"));
    assert_eq!(created.status, WorkOrderStatus::Draft);
    // Drafts raise no notification.
    assert!(producer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_falls_back_to_requested_price_when_part_is_gone() {
    let settings = dealership("10");
    let dealership_id = settings.id;
    let customer_id = Uuid::new_v4();
    let rv_id = Uuid::new_v4();

    let mut fixture = Fixture::new();
    fixture
        .customer_repo
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(customer(id, dealership_id))));
    fixture
        .rv_repo
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(rv(id, customer_id))));
    fixture
        .dealership_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(settings)));
    fixture.part_repo.expect_find_by_id().return_once(|_| Ok(None));
    fixture.work_order_repo.expect_insert().times(1).returning(|_| Ok(()));

    let (service, _) = fixture.service();
    let created = service
        .create(
            dealership_id,
            new_order(
                customer_id,
                rv_id,
                vec![RequestedPart {
                    part_id: Uuid::new_v4(),
                    name: "Discontinued awning motor".into(),
                    unit_price: dec("80"),
                    quantity: 2,
                }],
            ),
        )
        .await
        .unwrap();

    assert_eq!(created.parts[0].name, "Discontinued awning motor");
    assert_eq!(created.parts[0].unit_price, dec("88.00"));
    assert_eq!(created.total_estimate, dec("176.00") + dec("362.50"));
}

#[tokio::test]
async fn create_fails_when_customer_is_missing() {
    let mut fixture = Fixture::new();
    fixture.customer_repo.expect_find_by_id().return_once(|_| Ok(None));

    let (service, _) = fixture.service();
    let result = service
        .create(
            Uuid::new_v4(),
            new_order(Uuid::new_v4(), Uuid::new_v4(), vec![]),
        )
        .await;
    assert!(matches!(
        result,
        Err(WorkOrderException::CustomerNotFound { .. })
    ));
}

#[tokio::test]
async fn create_rejects_non_initial_status() {
    let fixture = Fixture::new();
    let (service, _) = fixture.service();

    let mut order = new_order(Uuid::new_v4(), Uuid::new_v4(), vec![]);
    order.status = WorkOrderStatus::Approved;
    let result = service.create(Uuid::new_v4(), order).await;
    assert!(matches!(
        result,
        Err(WorkOrderException::InvalidInitialStatus { .. })
    ));
}

#[tokio::test]
async fn update_recomputes_total_from_merged_state() {
    let existing = work_order(WorkOrderStatus::Draft);
    let id = existing.id;

    let mut fixture = Fixture::new();
    fixture
        .work_order_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    fixture
        .work_order_repo
        .expect_update()
        .withf(|order| order.total_estimate == "709.40".parse::<Decimal>().unwrap())
        .times(1)
        .returning(|_| Ok(()));

    let (service, _) = fixture.service();
    let updated = service
        .update(
            id,
            WorkOrderPatch {
                labor_hours: Some(dec("3")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 274.40 parts + 3h * 145 labor.
    assert_eq!(updated.total_estimate, dec("709.40"));
}

#[tokio::test]
async fn update_rejects_illegal_transition() {
    let existing = work_order(WorkOrderStatus::Submitted);
    let id = existing.id;

    let mut fixture = Fixture::new();
    fixture
        .work_order_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    fixture.work_order_repo.expect_update().times(0);

    let (service, producer) = fixture.service();
    let result = service
        .update(
            id,
            WorkOrderPatch {
                status: Some(WorkOrderStatus::Completed),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(WorkOrderException::InvalidStatusTransition {
            from: WorkOrderStatus::Submitted,
            to: WorkOrderStatus::Completed,
        })
    ));
    assert!(producer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_publishes_once_on_submission() {
    let existing = work_order(WorkOrderStatus::Draft);
    let id = existing.id;
    let dealership_id = existing.dealership_id;

    let mut fixture = Fixture::new();
    fixture
        .work_order_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    fixture.work_order_repo.expect_update().times(1).returning(|_| Ok(()));

    let (service, producer) = fixture.service();
    service
        .update(
            id,
            WorkOrderPatch {
                status: Some(WorkOrderStatus::Submitted),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let sent = producer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].work_order_id, id);
    assert_eq!(sent[0].dealership_id, dealership_id);
    assert_eq!(sent[0].status, WorkOrderStatus::Submitted);
}

#[tokio::test]
async fn force_set_status_bypasses_the_transition_table() {
    let existing = work_order(WorkOrderStatus::Completed);
    let id = existing.id;

    let mut fixture = Fixture::new();
    fixture
        .work_order_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    fixture.work_order_repo.expect_update().times(1).returning(|_| Ok(()));

    let (service, _) = fixture.service();
    let reopened = service
        .force_set_status(id, WorkOrderStatus::Draft)
        .await
        .unwrap();
    assert_eq!(reopened.status, WorkOrderStatus::Draft);
}

#[tokio::test]
async fn delete_missing_work_order_is_not_found() {
    let mut fixture = Fixture::new();
    fixture.work_order_repo.expect_delete_by_id().return_once(|_| Ok(false));

    let (service, _) = fixture.service();
    let result = service.delete(Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(WorkOrderException::WorkOrderNotFound { .. })
    ));
}
