use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::{DAILY_SPIN_QUOTA, SpinService};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i32> {
    req.extensions().get::<i32>().copied()
}

#[utoipa::path(
    get,
    path = "/spins/count",
    tag = "spins",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Today's spin count and remaining quota", body = SpinCountResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_count(service: web::Data<SpinService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match service.count_today(user_id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": SpinCountResponse {
                count,
                remaining: (DAILY_SPIN_QUOTA - count).max(0),
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/spins",
    tag = "spins",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Spin performed", body = SpinResponse),
        (status = 400, description = "Daily quota exceeded"),
        (status = 401, description = "Unauthorized")
    )
)]
/// Perform one spin: checks the daily quota, draws the reward (fixed 50-point
/// bonus on the first spin of the day), appends the event and grants the
/// points in one transaction.
pub async fn spin(service: web::Data<SpinService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match service.spin(user_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": result
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/spins/recent",
    tag = "spins",
    params(
        ("limit" = Option<u64>, Query, description = "Cap on returned events (default 10)")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Spin events ascending by creation time", body = [SpinEventResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_recent(
    service: web::Data<SpinService>,
    req: HttpRequest,
    query: web::Query<RecentSpinsQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    let limit = query.limit.unwrap_or(10);

    match service.recent(user_id, limit).await {
        Ok(spins) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": spins
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn spin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spins")
            .route("", web::post().to(spin))
            .route("/count", web::get().to(get_count))
            .route("/recent", web::get().to(get_recent)),
    );
}
