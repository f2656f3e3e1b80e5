use crate::web::model::{
    EvenPage, EvenQuery, MatrixForm, MatrixPage, NthLargestForm, NthLargestPage,
};
use crate::web::views;
use crate::workflow::runner::Runner;
use calccore::interface::{
    format_matrix_fixed, parse_rank, ErrorResponse, EvenRequest, EvenResponse, MatrixRequest,
    MatrixResponse, NthLargestRequest, NthLargestResponse,
};
use calccore::math::MatrixHelper;
use calccore::prelude::{CalcResult, ErrorKind};
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};
use warp::{Filter, Rejection, Reply};

const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Every page, API endpoint and the fallback error handler.
pub fn routes(
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());

    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(views::index().into_string()));

    let nth_form = warp::path!("nth-largest")
        .and(warp::get())
        .map(|| warp::reply::html(views::nth_largest(&NthLargestPage::default()).into_string()));

    let nth_submit = warp::path!("nth-largest")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and(runner_filter.clone())
        .map(|form: NthLargestForm, runner: Arc<Runner>| {
            let outcome = match parse_rank(&form.n) {
                Ok(k) => runner.nth_largest_text(&form.numbers, k),
                Err(err) => runner.reject("nth-largest", err),
            };
            let page = NthLargestPage {
                form,
                outcome: Some(outcome),
            };
            warp::reply::html(views::nth_largest(&page).into_string())
        });

    let matrix_form = warp::path!("matrix")
        .and(warp::get())
        .map(|| warp::reply::html(views::matrix(&MatrixPage::default()).into_string()));

    let matrix_submit = warp::path!("matrix")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and(runner_filter.clone())
        .map(|form: MatrixForm, runner: Arc<Runner>| {
            let outcome = runner
                .multiply_text(&form.matrix1, &form.matrix2)
                .map(|product| format_matrix_fixed(product.view(), 2));
            let page = MatrixPage {
                form,
                outcome: Some(outcome),
            };
            warp::reply::html(views::matrix(&page).into_string())
        });

    let evens_page = warp::path!("evens")
        .and(warp::get())
        .and(warp::query::<EvenQuery>())
        .and(runner_filter.clone())
        .map(|query: EvenQuery, runner: Arc<Runner>| {
            let max = runner.limits().max_even_count;
            let page = match query.n {
                Some(n) => {
                    let outcome = match parse_rank(&n) {
                        Ok(count) => runner.evens(count),
                        Err(err) => runner.reject("evens", err),
                    };
                    EvenPage {
                        n,
                        max,
                        outcome: Some(outcome),
                    }
                }
                None => EvenPage {
                    n: "10".into(),
                    max,
                    outcome: None,
                },
            };
            warp::reply::html(views::evens(&page).into_string())
        });

    let api_nth = warp::path!("api" / "nth-largest")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(runner_filter.clone())
        .map(|request: NthLargestRequest, runner: Arc<Runner>| {
            let outcome = match request.numbers.resolve() {
                Ok(values) => runner.nth_largest(&values, request.k),
                Err(err) => runner.reject("nth-largest", err),
            };
            api_reply(outcome.map(NthLargestResponse::from))
        });

    let api_multiply = warp::path!("api" / "multiply")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(runner_filter.clone())
        .map(|request: MatrixRequest, runner: Arc<Runner>| {
            let operands = request.operands();
            let outcome = match operands {
                Ok((lhs, rhs)) => runner.multiply(lhs.view(), rhs.view()),
                Err(err) => runner.reject("matrix", err),
            };
            api_reply(outcome.map(|product| MatrixResponse {
                rows: product.nrows(),
                cols: product.ncols(),
                product: MatrixHelper::to_rows(product.view()),
            }))
        });

    let api_evens = warp::path!("api" / "evens")
        .and(warp::get())
        .and(warp::query::<EvenRequest>())
        .and(runner_filter.clone())
        .map(|request: EvenRequest, runner: Arc<Runner>| {
            let outcome = match request.count() {
                Ok(n) => runner.evens(n).map(|numbers| EvenResponse { n, numbers }),
                Err(err) => runner.reject("evens", err),
            };
            api_reply(outcome)
        });

    let health = warp::path!("health")
        .and(warp::get())
        .and(runner_filter)
        .map(|runner: Arc<Runner>| {
            let metrics = runner.metrics();
            warp::reply::json(&json!({
                "status": "healthy",
                "processed": metrics.processed,
                "errors": metrics.errors,
            }))
        });

    index
        .or(nth_form)
        .or(nth_submit)
        .or(matrix_form)
        .or(matrix_submit)
        .or(evens_page)
        .or(api_nth)
        .or(api_multiply)
        .or(api_evens)
        .or(health)
        .recover(handle_rejection)
}

fn api_reply<T: Serialize>(outcome: CalcResult<T>) -> WithStatus<Json> {
    match outcome {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), StatusCode::OK),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&ErrorResponse::from(&err)),
            StatusCode::BAD_REQUEST,
        ),
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, json!({ "error": "Endpoint not found" }))
    } else if let Some(err) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, decode_failure(err.to_string()))
    } else if let Some(err) = rejection.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, decode_failure(err.to_string()))
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            json!({ "error": "Request body too large" }),
        )
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            json!({ "error": "Unsupported content type" }),
        )
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "error": "Method not allowed" }),
        )
    } else {
        error!("unhandled rejection: {:?}", rejection);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Internal server error" }),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

/// Body or query that could not be decoded at all, shaped like a calculator error.
fn decode_failure(message: String) -> serde_json::Value {
    json!(ErrorResponse {
        error: ErrorKind::Parse,
        message,
    })
}

/// Serves until `shutdown` resolves.
pub async fn serve<F>(runner: Arc<Runner>, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (bound, server) =
        warp::serve(routes(runner)).try_bind_with_graceful_shutdown(addr, shutdown)?;
    info!("listening on http://{}", bound);
    server.await;
    info!("server stopped");
    Ok(())
}
