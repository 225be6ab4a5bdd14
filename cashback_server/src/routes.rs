//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! network calls to the directory or processor) must be expressed as futures or asynchronous functions. Async handlers
//! get executed concurrently by worker threads and thus don't block execution.

use actix_web::{get, web, HttpResponse, Responder};
use cashback_engine::{
    db_types::BusinessId,
    traits::{BusinessDirectory, PaymentProcessor, TransactionLedger},
    DirectoryApi,
    RelayApi,
    StatsApi,
};
use log::*;

use crate::{
    data_objects::{
        BusinessBalanceResponse,
        ConfirmCashbackRequest,
        ProcessTransactionRequest,
        ProcessTransactionResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Directory  ----------------------------------------------------
route!(businesses => Get "/businesses" impl BusinessDirectory);
/// Route handler for the businesses endpoint
///
/// Returns every business currently marked active in the directory. Inactive rows are omitted, not flagged.
pub async fn businesses<D: BusinessDirectory>(api: web::Data<DirectoryApi<D>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET businesses");
    let businesses = api.active_businesses().await.map_err(|e| {
        debug!("💻️ Could not fetch businesses from the directory. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(businesses))
}

route!(business_by_id => Get "/business/{id}" impl TransactionLedger, BusinessDirectory);
/// Route handler for the business/{id} endpoint
///
/// Returns the directory record together with the cashback the business has earned on completed transactions.
pub async fn business_by_id<L: TransactionLedger, D: BusinessDirectory>(
    path: web::Path<BusinessId>,
    directory: web::Data<DirectoryApi<D>>,
    stats: web::Data<StatsApi<L, D>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET business {id}");
    let business = directory
        .business_by_id(&id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Business {id} does not exist")))?;
    let cashback_balance = stats.cashback_balance(&id).await?;
    Ok(HttpResponse::Ok().json(BusinessBalanceResponse { business, cashback_balance }))
}

//----------------------------------------------   Relay  ----------------------------------------------------
route!(process_transaction => Post "/process-transaction" impl TransactionLedger, BusinessDirectory, PaymentProcessor);
/// Route handler for the process-transaction endpoint
///
/// This is the relay's money-moving endpoint. Both participants must be active directory members and the amount must
/// be strictly positive. On success the response carries the pending ledger record, the processor handle the buyer
/// needs to authorize the charge, and the cashback that will be earned once the charge settles.
pub async fn process_transaction<L, D, P>(
    body: web::Json<ProcessTransactionRequest>,
    api: web::Data<RelayApi<L, D, P>>,
) -> Result<HttpResponse, ServerError>
where
    L: TransactionLedger,
    D: BusinessDirectory,
    P: PaymentProcessor,
{
    let ProcessTransactionRequest { buyer_id, seller_id, amount, description } = body.into_inner();
    debug!("💻️ POST process_transaction. {buyer_id} pays {seller_id} {amount}");
    let (transaction, payment_intent) =
        api.create_transaction(&buyer_id, &seller_id, amount, &description).await.map_err(|e| {
            debug!("💻️ Could not process transaction. {e}");
            ServerError::from(e)
        })?;
    let cashback_amount = transaction.cashback;
    Ok(HttpResponse::Ok().json(ProcessTransactionResponse { transaction, payment_intent, cashback_amount }))
}

route!(confirm_cashback => Post "/confirm-cashback" impl TransactionLedger, BusinessDirectory, PaymentProcessor);
/// Route handler for the confirm-cashback endpoint
///
/// Marks a transaction as completed by its ledger id. The normal settlement path is the processor webhook; this
/// endpoint covers manual reconciliation. Confirming an already-completed transaction is a no-op success.
pub async fn confirm_cashback<L, D, P>(
    body: web::Json<ConfirmCashbackRequest>,
    api: web::Data<RelayApi<L, D, P>>,
) -> Result<HttpResponse, ServerError>
where
    L: TransactionLedger,
    D: BusinessDirectory,
    P: PaymentProcessor,
{
    let ConfirmCashbackRequest { transaction_id } = body.into_inner();
    debug!("💻️ POST confirm_cashback for {transaction_id}");
    let transaction = api.confirm_transaction(&transaction_id).await.map_err(|e| {
        debug!("💻️ Could not confirm transaction. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(transaction))
}

//----------------------------------------------   Stats  ----------------------------------------------------
route!(dashboard => Get "/business/{id}/dashboard" impl TransactionLedger, BusinessDirectory);
/// Route handler for the business/{id}/dashboard endpoint
pub async fn dashboard<L: TransactionLedger, D: BusinessDirectory>(
    path: web::Path<BusinessId>,
    api: web::Data<StatsApi<L, D>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET dashboard for {id}");
    let dashboard = api.dashboard(&id).await.map_err(|e| {
        debug!("💻️ Could not assemble dashboard. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(dashboard))
}

route!(network_stats => Get "/network-stats" impl TransactionLedger, BusinessDirectory);
/// Route handler for the network-stats endpoint
pub async fn network_stats<L: TransactionLedger, D: BusinessDirectory>(
    api: web::Data<StatsApi<L, D>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET network_stats");
    let stats = api.network_stats().await.map_err(|e| {
        debug!("💻️ Could not compute network stats. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(stats))
}
