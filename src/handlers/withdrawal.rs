use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::WithdrawalService;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i32> {
    req.extensions().get::<i32>().copied()
}

#[utoipa::path(
    post,
    path = "/withdrawals",
    tag = "withdrawals",
    request_body = CreateWithdrawalRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Pending withdrawal created", body = WithdrawalResponse),
        (status = 400, description = "Below minimum or insufficient balance"),
        (status = 401, description = "Unauthorized")
    )
)]
/// Request a payout. The balance check and deduction are one atomic
/// conditional update; the request is created in `pending` status.
pub async fn create_withdrawal(
    service: web::Data<WithdrawalService>,
    req: HttpRequest,
    request: web::Json<CreateWithdrawalRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    let request = request.into_inner();

    match service
        .request_withdrawal(user_id, request.amount, request.destination)
        .await
    {
        Ok(withdrawal) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": withdrawal
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/withdrawals",
    tag = "withdrawals",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Withdrawal history ascending by creation time", body = [WithdrawalResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_withdrawals(
    service: web::Data<WithdrawalService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match service.list_for_user(user_id).await {
        Ok(withdrawals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": withdrawals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn withdrawal_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/withdrawals")
            .route("", web::post().to(create_withdrawal))
            .route("", web::get().to(get_withdrawals)),
    );
}
