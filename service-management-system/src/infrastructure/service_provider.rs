use std::sync::Arc;
use std::time::Duration;

use architecture::hosting::BackgroundService;

use domain_account::{
    repository::{DealershipRepo, ProfileRepo},
    service::{IdentityService, ProvisioningService},
};
use domain_notify::{
    repository::NotificationRepo,
    service::{ApprovalDispatchService, EmailSender, SmsSender, StatusNotifyService},
};
use domain_work_order::{
    repository::{ApprovalLogRepo, CustomerRepo, PartRepo, RvRepo, WorkOrderRepo},
    service::{ApprovalService, ReportService, WorkOrderService},
};
use service_account::ProvisioningServiceImpl;
use service_notify::{ApprovalDispatchServiceImpl, StatusNotifyServiceImpl};
use service_work_order::{ApprovalServiceImpl, ReportServiceImpl, WorkOrderServiceImpl};

use crate::config::{AppConfig, DatabaseKind};
use crate::infrastructure::database::Database;
use crate::infrastructure::identity::RestIdentityService;
use crate::infrastructure::message_queue::{
    InternalMessageQueueProducer, StatusChangeConsumer, STATUS_TOPIC,
};
use crate::infrastructure::repository::memory::{MemoryIdentityService, MemoryRepository};
use crate::infrastructure::repository::sea::SeaOrmRepository;
use crate::infrastructure::sender::{
    LogOnlyEmailSender, LogOnlySmsSender, RelayEmailSender, TwilioSmsSender,
};

/// Everything the api layer reaches for, wired once at startup.
pub struct ServiceProvider {
    config: AppConfig,
    status_mq: Arc<InternalMessageQueueProducer>,
    pub work_order_service: Arc<dyn WorkOrderService>,
    pub approval_service: Arc<dyn ApprovalService>,
    pub report_service: Arc<dyn ReportService>,
    pub provisioning_service: Arc<dyn ProvisioningService>,
    pub approval_dispatch_service: Arc<dyn ApprovalDispatchService>,
    pub status_notify_service: Arc<dyn StatusNotifyService>,
    pub work_order_repo: Arc<dyn WorkOrderRepo>,
    pub part_repo: Arc<dyn PartRepo>,
    pub customer_repo: Arc<dyn CustomerRepo>,
    pub rv_repo: Arc<dyn RvRepo>,
    pub approval_log_repo: Arc<dyn ApprovalLogRepo>,
    pub dealership_repo: Arc<dyn DealershipRepo>,
    pub profile_repo: Arc<dyn ProfileRepo>,
    pub notification_repo: Arc<dyn NotificationRepo>,
}

struct Backends {
    work_order_repo: Arc<dyn WorkOrderRepo>,
    part_repo: Arc<dyn PartRepo>,
    customer_repo: Arc<dyn CustomerRepo>,
    rv_repo: Arc<dyn RvRepo>,
    approval_log_repo: Arc<dyn ApprovalLogRepo>,
    dealership_repo: Arc<dyn DealershipRepo>,
    profile_repo: Arc<dyn ProfileRepo>,
    notification_repo: Arc<dyn NotificationRepo>,
    identity_service: Arc<dyn IdentityService>,
    sms_sender: Arc<dyn SmsSender>,
    email_sender: Arc<dyn EmailSender>,
}

impl ServiceProvider {
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        let backends = Self::build_backends(&config).await?;
        let status_mq = Arc::new(InternalMessageQueueProducer::new());

        let work_order_service = Arc::new(
            WorkOrderServiceImpl::builder()
                .work_order_repo(backends.work_order_repo.clone())
                .part_repo(backends.part_repo.clone())
                .customer_repo(backends.customer_repo.clone())
                .rv_repo(backends.rv_repo.clone())
                .dealership_repo(backends.dealership_repo.clone())
                .status_mq_producer(status_mq.clone())
                .status_mq_topic(STATUS_TOPIC.to_string())
                .build(),
        );
        let approval_service = Arc::new(
            ApprovalServiceImpl::builder()
                .work_order_repo(backends.work_order_repo.clone())
                .approval_log_repo(backends.approval_log_repo.clone())
                .status_mq_producer(status_mq.clone())
                .status_mq_topic(STATUS_TOPIC.to_string())
                .build(),
        );
        let report_service = Arc::new(
            ReportServiceImpl::builder()
                .work_order_repo(backends.work_order_repo.clone())
                .build(),
        );
        let provisioning_service = Arc::new(
            ProvisioningServiceImpl::builder()
                .dealership_repo(backends.dealership_repo.clone())
                .profile_repo(backends.profile_repo.clone())
                .identity_service(backends.identity_service.clone())
                .build(),
        );
        let approval_dispatch_service = Arc::new(
            ApprovalDispatchServiceImpl::builder()
                .approval_service(approval_service.clone())
                .work_order_repo(backends.work_order_repo.clone())
                .customer_repo(backends.customer_repo.clone())
                .rv_repo(backends.rv_repo.clone())
                .dealership_repo(backends.dealership_repo.clone())
                .sms_sender(backends.sms_sender.clone())
                .email_sender(backends.email_sender.clone())
                .base_url(config.site().base_url().clone())
                .build(),
        );
        let status_notify_service = Arc::new(
            StatusNotifyServiceImpl::builder()
                .profile_repo(backends.profile_repo.clone())
                .notification_repo(backends.notification_repo.clone())
                .build(),
        );

        Ok(Self {
            config,
            status_mq,
            work_order_service,
            approval_service,
            report_service,
            provisioning_service,
            approval_dispatch_service,
            status_notify_service,
            work_order_repo: backends.work_order_repo,
            part_repo: backends.part_repo,
            customer_repo: backends.customer_repo,
            rv_repo: backends.rv_repo,
            approval_log_repo: backends.approval_log_repo,
            dealership_repo: backends.dealership_repo,
            profile_repo: backends.profile_repo,
            notification_repo: backends.notification_repo,
        })
    }

    async fn build_backends(config: &AppConfig) -> anyhow::Result<Backends> {
        match config.db().kind() {
            DatabaseKind::Memory => {
                let store = Arc::new(MemoryRepository::new());
                Ok(Backends {
                    work_order_repo: store.clone(),
                    part_repo: store.clone(),
                    customer_repo: store.clone(),
                    rv_repo: store.clone(),
                    approval_log_repo: store.clone(),
                    dealership_repo: store.clone(),
                    profile_repo: store.clone(),
                    notification_repo: store,
                    identity_service: Arc::new(MemoryIdentityService::default()),
                    sms_sender: Arc::new(LogOnlySmsSender),
                    email_sender: Arc::new(LogOnlyEmailSender),
                })
            }
            DatabaseKind::Postgres => {
                let db = Arc::new(Database::connect(config.db()).await?);
                let store = Arc::new(SeaOrmRepository::new(db));
                let http_client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(*config.http_client().timeout_secs()))
                    .user_agent(config.http_client().user_agent().clone())
                    .build()?;
                Ok(Backends {
                    work_order_repo: store.clone(),
                    part_repo: store.clone(),
                    customer_repo: store.clone(),
                    rv_repo: store.clone(),
                    approval_log_repo: store.clone(),
                    dealership_repo: store.clone(),
                    profile_repo: store.clone(),
                    notification_repo: store,
                    identity_service: Arc::new(
                        RestIdentityService::builder()
                            .client(http_client.clone())
                            .base_url(config.identity().base_url().clone())
                            .admin_token(config.identity().admin_token().clone())
                            .build(),
                    ),
                    sms_sender: Arc::new(
                        TwilioSmsSender::builder()
                            .client(http_client.clone())
                            .config(config.sms().clone())
                            .build(),
                    ),
                    email_sender: Arc::new(
                        RelayEmailSender::builder()
                            .client(http_client)
                            .config(config.email().clone())
                            .build(),
                    ),
                })
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Long-running tasks hosted beside the web server.
    pub fn background_services(&self) -> Vec<Arc<dyn BackgroundService>> {
        vec![Arc::new(
            StatusChangeConsumer::builder()
                .receiver(self.status_mq.receiver())
                .status_notify_service(self.status_notify_service.clone())
                .build(),
        )]
    }
}
