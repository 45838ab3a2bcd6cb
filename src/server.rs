use std::io;

use actix_web::{
    http::header::ContentType, middleware::Logger, web, App, HttpResponse, HttpServer,
};
use log::info;
use tokio::signal;

use crate::{
    config::ServerConfig,
    error::{MlErr, PredictErr},
    form::FormValues,
    predict::{self, Outcome},
    render::Page,
    store::ModelStore,
};

/// Registers the form and prediction routes.
///
/// The app must carry a `web::Data<ModelStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(web::resource("/predict").route(web::post().to(submit)));
}

async fn index(store: web::Data<ModelStore>) -> HttpResponse {
    html(Page::blank(store.schema()))
}

/// Every failure of the pipeline still answers 200, with the message inline.
async fn submit(store: web::Data<ModelStore>, body: web::Bytes) -> HttpResponse {
    let values = FormValues::from_urlencoded(&body);

    let outcome = {
        let store = store.clone();
        let values = values.clone();
        web::block(move || predict::run(&store, &values))
            .await
            .unwrap_or_else(|e| {
                Outcome::from(Err::<f64, _>(PredictErr::Model(MlErr::Interrupted(
                    e.to_string(),
                ))))
            })
    };

    html(Page::answered(store.schema(), &values, &outcome))
}

fn html(page: Page<'_>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page.to_string())
}

/// Serves `store` until the server stops on its own or ctrl-c is received.
///
/// # Errors
/// Returns an `io::Error` if the address cannot be bound.
pub async fn serve(config: &ServerConfig, store: ModelStore) -> io::Result<()> {
    let store = web::Data::new(store);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(configure)
    })
    .disable_signals();

    if let Some(workers) = config.workers() {
        server = server.workers(workers.get());
    }

    let server = server.bind(config.addr())?;
    for addr in server.addrs() {
        info!("listening at http://{addr}");
    }

    let server = server.run();
    let handle = server.handle();
    tokio::pin!(server);

    tokio::select! {
        ret = &mut server => return ret,
        _ = signal::ctrl_c() => {
            info!("received ctrl-c, shutting down");
        }
    }

    // The server future has to keep running for the stop command to be processed.
    let (ret, ()) = tokio::join!(server, handle.stop(true));
    ret
}
