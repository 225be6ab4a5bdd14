use std::time::Duration;

use actix_web::{dev::Server, guard, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use cashback_engine::{
    traits::{BusinessDirectory, PaymentProcessor, TransactionLedger},
    DirectoryApi,
    MemoryLedger,
    RelayApi,
    RestDirectory,
    StatsApi,
};
use stripe_tools::StripeApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::stripe::StripeProcessor,
    middleware::StripeSigMiddlewareFactory,
    routes::{
        health,
        BusinessByIdRoute,
        BusinessesRoute,
        ConfirmCashbackRoute,
        DashboardRoute,
        NetworkStatsRoute,
        ProcessTransactionRoute,
    },
    webhook_routes::stripe_webhook,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let ledger = MemoryLedger::new();
    let directory = RestDirectory::new(&config.directory.base_url, &config.directory.api_key)
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let stripe_api =
        StripeApi::new(config.stripe.api.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let processor = StripeProcessor::new(stripe_api);
    let srv = create_server_instance(config, ledger, directory, processor)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<L, D, P>(
    config: ServerConfig,
    ledger: L,
    directory: D,
    processor: P,
) -> Result<Server, ServerError>
where
    L: TransactionLedger + Send + 'static,
    D: BusinessDirectory + Send + 'static,
    P: PaymentProcessor + Send + 'static,
{
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let relay_api = RelayApi::new(ledger.clone(), directory.clone(), processor.clone());
        let stats_api = StatsApi::new(ledger.clone(), directory.clone());
        let directory_api = DirectoryApi::new(directory.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cbr::access_log"))
            .app_data(web::Data::new(relay_api))
            .app_data(web::Data::new(stats_api))
            .app_data(web::Data::new(directory_api));
        let sig_check =
            StripeSigMiddlewareFactory::new(config.stripe.api.webhook_secret.clone(), config.stripe.signature_checks);
        let api_scope = web::scope("/api")
            .service(BusinessesRoute::<D>::new())
            .service(BusinessByIdRoute::<L, D>::new())
            .service(ProcessTransactionRoute::<L, D, P>::new())
            .service(ConfirmCashbackRoute::<L, D, P>::new())
            .service(DashboardRoute::<L, D>::new())
            .service(NetworkStatsRoute::<L, D>::new())
            .service(
                web::resource("/stripe-webhook")
                    .name("stripe_webhook")
                    .guard(guard::Post())
                    .to(stripe_webhook::<L, D, P>)
                    .wrap(sig_check),
            );
        app.service(health).service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
