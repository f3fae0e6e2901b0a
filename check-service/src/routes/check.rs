use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info, warn};
use nanoid::nanoid;

use crate::error::CheckError;
use crate::models::CheckResponse;
use crate::scoring;
use crate::settings::Settings;
use crate::upload::{self, Submission};

/// Validates and scores an uploaded input/output pair.
pub async fn check(
    req: HttpRequest,
    payload: web::Payload,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, CheckError> {
    let check_id = nanoid!(10);

    let Submission { input, output } =
        match upload::read_submission(&req, payload, settings.upload_limit).await {
            Ok(submission) => submission,
            Err(e) => {
                warn!("check {}: upload refused: {}", check_id, e);
                return Err(e.into());
            }
        };
    debug!(
        "check {}: input {} bytes, output {} bytes",
        check_id,
        input.len(),
        output.len()
    );

    // CPU-bound on large files.
    match web::block(move || scoring::check(&input, &output)).await? {
        Ok(report) => {
            info!(
                "check {}: {} frames, {} paintings, score {} ({} warnings)",
                check_id,
                report.num_frames,
                report.num_paintings,
                report.global_score,
                report.warnings.len()
            );
            Ok(HttpResponse::Ok().json(CheckResponse::new(check_id, report)))
        }
        Err(rejection) => {
            info!("check {}: {} {}", check_id, rejection, rejection.error);
            Err(CheckError::Rejected {
                check_id,
                rejection,
            })
        }
    }
}
