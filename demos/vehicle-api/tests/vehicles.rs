use apidoc_test::TestApp;
use serde_json::json;
use vehicle_api::model::NewVehicle;
use vehicle_api::store::VehicleStore;

async fn seeded_app() -> TestApp {
    let store = VehicleStore::seeded([
        NewVehicle { make: "Toyota".into(), model: "Corolla".into(), year: 2020 },
        NewVehicle { make: "Volvo".into(), model: "XC60".into(), year: 2022 },
    ])
    .await;
    TestApp::from_builder(vehicle_api::app(store).unwrap())
}

#[tokio::test]
async fn list_vehicles() {
    let app = seeded_app().await;
    app.get("/vehicles")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 2)
        .assert_json_path("[0].make", "Toyota")
        .assert_json_path("[1].id", 2);
}

#[tokio::test]
async fn get_vehicle() {
    let app = seeded_app().await;
    app.get("/vehicles/2")
        .send()
        .await
        .assert_ok()
        .assert_json_path("model", "XC60");
    app.get("/vehicles/99")
        .send()
        .await
        .assert_not_found()
        .assert_json_path("error", "Vehicle 99 not found");
}

#[tokio::test]
async fn create_vehicle() {
    let app = seeded_app().await;
    app.post("/vehicles")
        .json(&json!({ "make": "Ford", "model": "Focus", "year": 2018 }))
        .send()
        .await
        .assert_created()
        .assert_json_path("id", 3)
        .assert_json_path("make", "Ford");
    app.get("/vehicles").send().await.assert_json_path("len()", 3);
}

#[tokio::test]
async fn create_rejects_blank_make() {
    let app = seeded_app().await;
    app.post("/vehicles")
        .json(&json!({ "make": "  ", "model": "Focus", "year": 2018 }))
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("error", "make must not be empty");
}

#[tokio::test]
async fn update_vehicle() {
    let app = seeded_app().await;
    app.put("/vehicles/1")
        .json(&json!({ "make": "Toyota", "model": "Yaris", "year": 2021 }))
        .send()
        .await
        .assert_ok()
        .assert_json_path("model", "Yaris")
        .assert_json_path("year", 2021);
    app.put("/vehicles/42")
        .json(&json!({ "make": "Toyota", "model": "Yaris", "year": 2021 }))
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn delete_vehicle() {
    let app = seeded_app().await;
    app.delete("/vehicles/1").send().await.assert_no_content();
    app.delete("/vehicles/1").send().await.assert_not_found();
    app.get("/vehicles")
        .send()
        .await
        .assert_json_path("len()", 1)
        .assert_json_path("[0].make", "Volvo");
}
