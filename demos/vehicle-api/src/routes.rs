//! CRUD handlers for `/vehicles`.
//!
//! @openapi
//! tags:
//!   - name: Vehicles
//!     description: Vehicle management

use apidoc::http::extract::{Path, State};
use apidoc::http::response::{IntoResponse, Response};
use apidoc::http::routing::get;
use apidoc::http::{Json, Router, StatusCode};
use apidoc::HttpError;

use crate::model::{NewVehicle, Vehicle};
use crate::store::VehicleStore;

/// Routes of the vehicle resource.
pub fn router() -> Router<VehicleStore> {
    Router::new()
        .route("/vehicles", get(list).post(create))
        .route("/vehicles/{id}", get(show).put(update).delete(remove))
}

fn not_found(id: u64) -> HttpError {
    HttpError::NotFound(format!("Vehicle {id} not found"))
}

/// @openapi
/// /vehicles:
///   get:
///     summary: List all vehicles
///     tags: [Vehicles]
///     responses:
///       200:
///         description: Every vehicle in the store
///         content:
///           application/json:
///             schema:
///               type: array
///               items:
///                 $ref: '#/components/schemas/Vehicle'
async fn list(State(store): State<VehicleStore>) -> Json<Vec<Vehicle>> {
    Json(store.list().await)
}

/// @openapi
/// /vehicles/{id}:
///   get:
///     summary: Get a vehicle by id
///     tags: [Vehicles]
///     parameters:
///       - in: path
///         name: id
///         required: true
///         schema:
///           type: integer
///     responses:
///       200:
///         description: The vehicle
///         content:
///           application/json:
///             schema:
///               $ref: '#/components/schemas/Vehicle'
///       404:
///         description: No vehicle with that id
///         content:
///           application/json:
///             schema:
///               $ref: '#/components/schemas/Error'
async fn show(
    State(store): State<VehicleStore>,
    Path(id): Path<u64>,
) -> Result<Json<Vehicle>, HttpError> {
    store.get(id).await.map(Json).ok_or_else(|| not_found(id))
}

/// @openapi
/// /vehicles:
///   post:
///     summary: Create a vehicle
///     tags: [Vehicles]
///     requestBody:
///       required: true
///       content:
///         application/json:
///           schema:
///             $ref: '#/components/schemas/NewVehicle'
///     responses:
///       201:
///         description: The created vehicle
///         content:
///           application/json:
///             schema:
///               $ref: '#/components/schemas/Vehicle'
///       400:
///         description: Invalid vehicle
async fn create(
    State(store): State<VehicleStore>,
    Json(body): Json<NewVehicle>,
) -> Result<Response, HttpError> {
    body.validate().map_err(HttpError::BadRequest)?;
    let vehicle = store.create(body).await;
    tracing::info!(id = vehicle.id, "Vehicle created");
    Ok((StatusCode::CREATED, Json(vehicle)).into_response())
}

/// @openapi
/// /vehicles/{id}:
///   put:
///     summary: Replace a vehicle
///     tags: [Vehicles]
///     parameters:
///       - in: path
///         name: id
///         required: true
///         schema:
///           type: integer
///     requestBody:
///       required: true
///       content:
///         application/json:
///           schema:
///             $ref: '#/components/schemas/NewVehicle'
///     responses:
///       200:
///         description: The updated vehicle
///       400:
///         description: Invalid vehicle
///       404:
///         description: No vehicle with that id
async fn update(
    State(store): State<VehicleStore>,
    Path(id): Path<u64>,
    Json(body): Json<NewVehicle>,
) -> Result<Json<Vehicle>, HttpError> {
    body.validate().map_err(HttpError::BadRequest)?;
    store
        .update(id, body)
        .await
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// @openapi
/// /vehicles/{id}:
///   delete:
///     summary: Delete a vehicle
///     tags: [Vehicles]
///     parameters:
///       - in: path
///         name: id
///         required: true
///         schema:
///           type: integer
///     responses:
///       204:
///         description: Deleted
///       404:
///         description: No vehicle with that id
async fn remove(
    State(store): State<VehicleStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, HttpError> {
    if store.delete(id).await {
        tracing::info!(id, "Vehicle deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
