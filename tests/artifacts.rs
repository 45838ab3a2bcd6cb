use std::path::PathBuf;

use actix_web::{test as atest, web, App};

use rul_predictor::{server, ModelStore};

fn shipped_model_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model")
}

#[test]
fn shipped_artifacts_load() {
    let store = ModelStore::load(shipped_model_dir()).unwrap();

    assert_eq!(
        store.schema().identifiers(),
        ["sensor_2", "sensor_3", "sensor_4", "sensor_7"]
    );
    assert_eq!(store.schema().labels().len(), 4);
    assert_eq!(store.model().n_features(), store.schema().len());
}

#[actix_rt::test]
async fn shipped_artifacts_serve_predictions() {
    let store = ModelStore::load(shipped_model_dir()).unwrap();
    let app = atest::init_service(
        App::new()
            .app_data(web::Data::new(store))
            .configure(server::configure),
    )
    .await;

    let req = atest::TestRequest::post()
        .uri("/predict")
        .set_form(&[
            ("sensor_2", "642.0"),
            ("sensor_3", "1585.0"),
            ("sensor_4", "1398.0"),
            ("sensor_7", "554.0"),
        ])
        .to_request();
    let body = atest::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("Predicted RUL: 163.90 hours"));
    assert!(body.contains("T24 - Total temperature at LPC outlet (°R)"));
}
