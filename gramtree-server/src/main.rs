use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, middleware, post, web};

use serde::Serialize;
use serde_json::Value;

use gramtree_core::model::counts::{NgramData, count_ngrams};

/// Upper bound on request payloads. Large text batches with small n can
/// produce trees with combinatorially many distinct paths, so the input
/// size is capped per request.
const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Response body for the `/v1/ngrams` endpoint: one result per window
/// length the platform works with.
#[derive(Serialize)]
struct NgramResponse {
	bigrams: NgramData,
	trigrams: NgramData,
	tetragrams: NgramData,
}

#[derive(Serialize)]
struct ErrorResponse {
	error: &'static str,
}

fn missing_data() -> HttpResponse {
	HttpResponse::BadRequest().json(ErrorResponse { error: "Missing data" })
}

/// Extracts the input batch from a request body.
///
/// The payload must be a JSON object with an `input` field holding an
/// array of strings. Anything else is rejected as missing data.
fn parse_inputs(body: &[u8]) -> Option<Vec<String>> {
	let payload: Value = serde_json::from_slice(body).ok()?;
	let inputs = payload.get("input")?.as_array()?;
	inputs.iter().map(|item| item.as_str().map(str::to_owned)).collect()
}

fn ngrams_for_all_sizes(inputs: &[String]) -> Result<NgramResponse, String> {
	Ok(NgramResponse {
		bigrams: count_ngrams(inputs, 2)?,
		trigrams: count_ngrams(inputs, 3)?,
		tetragrams: count_ngrams(inputs, 4)?,
	})
}

/// HTTP POST endpoint `/v1/ngrams`
///
/// Counts bigrams, trigrams and tetragrams over the submitted batch of
/// strings and returns all three results. Malformed payloads get a 400
/// with the fixed "Missing data" error body.
#[post("/v1/ngrams")]
async fn post_ngrams(body: web::Bytes) -> impl Responder {
	let inputs = match parse_inputs(&body) {
		Some(inputs) => inputs,
		None => return missing_data(),
	};

	match ngrams_for_all_sizes(&inputs) {
		Ok(response) => HttpResponse::Ok().json(response),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

/// Main entry point for the server.
///
/// Starts an Actix-web HTTP server exposing the n-gram counting
/// endpoint. Each request is an independent, stateless computation, so
/// no shared state is held.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - CORS is permissive: the endpoint is consumed from browsers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	log::info!("starting n-gram server on 127.0.0.1:5000");

	HttpServer::new(|| {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
			.service(post_ngrams)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
