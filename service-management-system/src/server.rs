use std::sync::Arc;

use colored::Colorize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api;
use crate::config::build_config;
use crate::infrastructure::ServiceProvider;
use crate::telemetry::initialize_telemetry;

pub fn run() {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.log()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    }

    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build service provider".red(), e);
        }
    };

    let handles = service_provider
        .background_services()
        .into_iter()
        .map(|service| {
            tokio::spawn(async move {
                service.run().await;
            })
        })
        .collect::<Vec<JoinHandle<()>>>();

    tokio::select! {
        _ = initialize_web_host(service_provider) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping services (ctrl-c handling).");
            for handle in handles {
                handle.abort();
            }
            std::process::exit(0);
        }
    }
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let bind_address = sp.config().host().bind_address().clone();
    let bind_port = *sp.config().host().bind_port();

    match actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method()
            .max_age(86400);

        actix_web::App::new()
            .wrap(cors)
            .app_data(actix_web::web::Data::from(sp.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(api::work_order::create_work_order)
            .service(api::work_order::list_work_orders)
            .service(api::work_order::get_work_order)
            .service(api::work_order::update_work_order)
            .service(api::work_order::force_work_order_status)
            .service(api::work_order::delete_work_order)
            .service(api::work_order::send_for_approval)
            .service(api::approval::view_approval)
            .service(api::approval::decide_approval)
            .service(api::account::create_dealership_owner)
            .service(api::account::create_user)
            .service(api::account::list_profiles)
            .service(api::customer::list_customers)
            .service(api::customer::create_customer)
            .service(api::customer::get_customer)
            .service(api::customer::update_customer)
            .service(api::customer::delete_customer)
            .service(api::customer::list_customer_rvs)
            .service(api::customer::create_rv)
            .service(api::customer::update_rv)
            .service(api::customer::delete_rv)
            .service(api::part::list_parts)
            .service(api::part::create_part)
            .service(api::part::update_part)
            .service(api::part::delete_part)
            .service(api::settings::get_settings)
            .service(api::settings::update_settings)
            .service(api::notification::list_notifications)
            .service(api::notification::unread_count)
            .service(api::notification::mark_read)
            .service(api::notification::mark_all_read)
            .service(api::report::revenue_report)
    })
    .bind((bind_address.as_str(), bind_port))
    {
        Ok(server) => {
            info!("Listening on {bind_address}:{bind_port}");
            if let Err(e) = server.run().await {
                tracing::error!("Web server exited: {e}");
            }
        }
        Err(e) => tracing::error!("Cannot bind {bind_address}:{bind_port}: {e}"),
    }
}
