use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::WorkOrderResult,
    model::{
        entity::{work_order::WorkOrderStatus, ApprovalLog, Customer, Part, Rv, WorkOrder},
        vo::{
            CustomerDecision, DeliveryMethod, IssuedApproval, RequesterMeta, TokenValidation,
        },
    },
    repository::{
        ApprovalLogRepo, CustomerDecisionUpdate, CustomerRepo, PartRepo, RvRepo, WorkOrderRepo,
    },
    service::ApprovalService,
};

mock! {
    pub WorkOrderRepo {}
    #[async_trait]
    impl WorkOrderRepo for WorkOrderRepo {
        async fn find_by_approval_token(&self, token: &str) -> anyhow::Result<Option<WorkOrder>>;
        async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<WorkOrder>>;
        async fn set_approval_token(
            &self,
            id: Uuid,
            token: &str,
            expires_at: DateTime<Utc>,
        ) -> anyhow::Result<()>;
        async fn finalize_customer_decision(
            &self,
            update: CustomerDecisionUpdate,
        ) -> anyhow::Result<bool>;
        async fn list_completed_between(
            &self,
            dealership_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<Vec<WorkOrder>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<WorkOrder> for WorkOrderRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkOrder>>;
        async fn get_all(&self) -> anyhow::Result<Vec<WorkOrder>>;
    }
    #[async_trait]
    impl MutableRepository<WorkOrder> for WorkOrderRepo {
        async fn insert(&self, entity: &WorkOrder) -> anyhow::Result<()>;
        async fn update(&self, entity: &WorkOrder) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<WorkOrder> for WorkOrderRepo {}
}

mock! {
    pub PartRepo {}
    #[async_trait]
    impl PartRepo for PartRepo {
        async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Part>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Part> for PartRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Part>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Part>>;
    }
    #[async_trait]
    impl MutableRepository<Part> for PartRepo {
        async fn insert(&self, entity: &Part) -> anyhow::Result<()>;
        async fn update(&self, entity: &Part) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Part> for PartRepo {}
}

mock! {
    pub CustomerRepo {}
    #[async_trait]
    impl CustomerRepo for CustomerRepo {
        async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Customer>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Customer> for CustomerRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Customer>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Customer>>;
    }
    #[async_trait]
    impl MutableRepository<Customer> for CustomerRepo {
        async fn insert(&self, entity: &Customer) -> anyhow::Result<()>;
        async fn update(&self, entity: &Customer) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Customer> for CustomerRepo {}
}

mock! {
    pub RvRepo {}
    #[async_trait]
    impl RvRepo for RvRepo {
        async fn list_by_customer(&self, customer_id: Uuid) -> anyhow::Result<Vec<Rv>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Rv> for RvRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Rv>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Rv>>;
    }
    #[async_trait]
    impl MutableRepository<Rv> for RvRepo {
        async fn insert(&self, entity: &Rv) -> anyhow::Result<()>;
        async fn update(&self, entity: &Rv) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Rv> for RvRepo {}
}

mock! {
    pub ApprovalService {}
    #[async_trait]
    impl ApprovalService for ApprovalService {
        async fn issue(
            &self,
            work_order_id: Uuid,
            method: DeliveryMethod,
        ) -> WorkOrderResult<IssuedApproval>;
        async fn resolve(
            &self,
            token: &str,
            viewer: Option<RequesterMeta>,
        ) -> WorkOrderResult<WorkOrder>;
        async fn validate(&self, token: &str) -> WorkOrderResult<TokenValidation>;
        async fn finalize(
            &self,
            token: &str,
            decision: CustomerDecision,
            notes: Option<String>,
            meta: RequesterMeta,
        ) -> WorkOrderResult<WorkOrderStatus>;
    }
}

mock! {
    pub ApprovalLogRepo {}
    #[async_trait]
    impl ApprovalLogRepo for ApprovalLogRepo {
        async fn append(&self, entry: &ApprovalLog) -> anyhow::Result<()>;
        async fn list_by_work_order(&self, work_order_id: Uuid) -> anyhow::Result<Vec<ApprovalLog>>;
    }
}
