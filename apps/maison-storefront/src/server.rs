//! Server-side rendering for Spin/WASI.

use crate::api::*;
use crate::app::{shell, App};
use leptos::{config::get_configuration, task::Executor as LeptosExecutor};
use leptos_wasi::{
    handler::HandlerError,
    prelude::{IncomingRequest, ResponseOutparam, WasiExecutor},
};
use maison_services::StorefrontConfig;
use std::sync::Once;
use wasi::exports::http::incoming_handler::Guest;
use wasi::http::proxy::export;
use wasi::http::types::{Fields, OutgoingBody, OutgoingResponse};

/// Largest write a WASI output stream accepts in one call.
const WRITE_CHUNK: usize = 4096;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        // Spin forwards stderr to its log files.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

struct MaisonServer;

impl Guest for MaisonServer {
    fn handle(request: IncomingRequest, response_out: ResponseOutparam) {
        init_tracing();
        let executor = WasiExecutor::new(leptos_wasi::executor::Mode::Stalled);
        if let Err(e) = LeptosExecutor::init_local_custom_executor(executor.clone()) {
            tracing::error!(error = ?e, "executor init failed");
            return;
        }
        executor.run_until(async {
            if request.path_with_query().as_deref() == Some("/sitemap.xml") {
                serve_sitemap(response_out);
                return;
            }
            if let Err(e) = handle_request(request, response_out).await {
                tracing::error!(error = ?e, "request failed");
            }
        })
    }
}

async fn handle_request(
    request: IncomingRequest,
    response_out: ResponseOutparam,
) -> Result<(), HandlerError> {
    use leptos_wasi::prelude::Handler;

    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!(error = %e, "leptos configuration unavailable");
            write_response(response_out, 500, "text/plain; charset=utf-8", "Server misconfigured");
            return Ok(());
        }
    };
    let leptos_options = conf.leptos_options;

    Handler::build(request, response_out)?
        // Session and account
        .with_server_fn::<CurrentUser>()
        .with_server_fn::<Login>()
        .with_server_fn::<Register>()
        .with_server_fn::<Logout>()
        .with_server_fn::<RequestPasswordReset>()
        .with_server_fn::<UpdateProfile>()
        // Catalog and content
        .with_server_fn::<ListProducts>()
        .with_server_fn::<GetProductDetail>()
        .with_server_fn::<GetHomeData>()
        .with_server_fn::<Navigation>()
        .with_server_fn::<GetLegalPage>()
        .with_server_fn::<SubmitInquiry>()
        .with_server_fn::<CreateReview>()
        // Cart and wishlist
        .with_server_fn::<FetchCart>()
        .with_server_fn::<AddToCart>()
        .with_server_fn::<UpdateCartQuantity>()
        .with_server_fn::<RemoveCartLine>()
        .with_server_fn::<ClearCart>()
        .with_server_fn::<FetchWishlist>()
        .with_server_fn::<AddToWishlist>()
        .with_server_fn::<RemoveFromWishlist>()
        // Orders
        .with_server_fn::<SubmitOrder>()
        .with_server_fn::<MyOrders>()
        .with_server_fn::<CancelOrder>()
        // Admin
        .with_server_fn::<AdminOrders>()
        .with_server_fn::<UpdateOrderStatus>()
        .with_server_fn::<AdminTestimonials>()
        .with_server_fn::<SaveTestimonial>()
        .with_server_fn::<DeleteTestimonial>()
        .with_server_fn::<ReorderTestimonials>()
        .with_server_fn::<AdminInquiries>()
        .with_server_fn::<UpdateInquiryStatus>()
        .with_server_fn::<DeleteInquiry>()
        .with_server_fn::<AdminUsers>()
        .with_server_fn::<UpdateUserRole>()
        .with_server_fn::<DeleteUser>()
        .with_server_fn::<SaveNavigation>()
        .with_server_fn::<AdminSections>()
        .with_server_fn::<UpdateSection>()
        .with_server_fn::<LegalPages>()
        .with_server_fn::<SaveLegalPage>()
        .with_server_fn::<DeleteReview>()
        .generate_routes(App)
        .handle_with_context(move || shell(leptos_options.clone()), || {})
        .await?;

    Ok(())
}

fn serve_sitemap(response_out: ResponseOutparam) {
    let xml = StorefrontConfig::from_env()
        .map_err(|e| format!("{e:#}"))
        .and_then(|config| {
            spin_sdk::http::run(maison_services::sitemap::build(&config.client(), &config))
                .map_err(|e| e.to_string())
        });
    match xml {
        Ok(xml) => write_response(response_out, 200, "application/xml; charset=utf-8", &xml),
        Err(error) => {
            tracing::error!(%error, "sitemap unavailable");
            write_response(response_out, 503, "text/plain; charset=utf-8", "Sitemap unavailable");
        }
    }
}

/// Send a complete response outside the Leptos handler.
fn write_response(response_out: ResponseOutparam, status: u16, content_type: &str, body: &str) {
    let headers = Fields::new();
    if headers
        .set(&"content-type".to_string(), &[content_type.as_bytes().to_vec()])
        .is_err()
    {
        tracing::warn!(content_type, "could not set content-type");
    }
    let response = OutgoingResponse::new(headers);
    let _ = response.set_status_code(status);
    let Ok(outgoing) = response.body() else {
        tracing::error!("response body already taken");
        return;
    };
    ResponseOutparam::set(response_out, Ok(response));

    let Ok(stream) = outgoing.write() else {
        tracing::error!("response stream unavailable");
        return;
    };
    for chunk in body.as_bytes().chunks(WRITE_CHUNK) {
        if let Err(e) = stream.blocking_write_and_flush(chunk) {
            tracing::error!(error = ?e, "response write failed");
            return;
        }
    }
    drop(stream);
    if let Err(e) = OutgoingBody::finish(outgoing, None) {
        tracing::error!(error = ?e, "response finish failed");
    }
}

export!(MaisonServer with_types_in wasi);
