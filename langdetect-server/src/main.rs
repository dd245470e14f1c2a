use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::{get, post, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};

use serde::Deserialize;
use langdetect_core::model::profile_loader::ProfileLoader;
use langdetect_core::{Detector, DetectorSettings};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "langdetect-server", about = "HTTP language detection service")]
struct Args {
	/// Directory holding the language profiles
	#[arg(long, env = "LANGDETECT_PROFILES", default_value = "./profiles")]
	profiles: PathBuf,

	/// JSON settings file (defaults are used when absent)
	#[arg(long, env = "LANGDETECT_SETTINGS")]
	settings: Option<PathBuf>,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters of `GET /v1/detect`
#[derive(Deserialize)]
struct DetectParams {
	text: Option<String>,
}

#[derive(Deserialize)]
struct LanguageQuery {
	names: Option<String>,
}

/// State shared by every worker.
///
/// The detector itself is immutable. A reload builds a complete new detector
/// first and only then swaps the `Arc` under the write lock, so readers never
/// see a half-built one.
struct SharedData {
	detector: RwLock<Arc<Detector>>,
	settings: DetectorSettings,
	profile_root: PathBuf,
}

impl SharedData {
	fn detector(&self) -> Result<Arc<Detector>, String> {
		self.detector
			.read()
			.map(|d| Arc::clone(&d))
			.map_err(|_| "Detector lock failed".to_owned())
	}
}

fn detect_response(data: &SharedData, text: &str) -> HttpResponse {
	match data.detector() {
		Ok(detector) => HttpResponse::Ok().json(detector.detect_all(text)),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

/// HTTP GET endpoint `/v1/detect?text=...`
///
/// Returns the ranked languages as JSON.
#[get("/v1/detect")]
async fn get_detect(data: web::Data<SharedData>, query: web::Query<DetectParams>) -> impl Responder {
	match &query.text {
		Some(text) => detect_response(&data, text),
		None => HttpResponse::BadRequest().body("Missing text parameter"),
	}
}

/// HTTP POST endpoint `/v1/detect`, the raw body is the text.
#[post("/v1/detect")]
async fn post_detect(data: web::Data<SharedData>, body: String) -> impl Responder {
	detect_response(&data, &body)
}

#[get("/v1/languages")]
async fn get_languages(data: web::Data<SharedData>) -> impl Responder {
	match data.detector() {
		Ok(detector) => HttpResponse::Ok().body(detector.languages().join("\n")),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

#[get("/v1/profiles")]
async fn get_profiles(data: web::Data<SharedData>) -> impl Responder {
	let loader = ProfileLoader::new(&data.profile_root, data.settings.profile.as_deref());
	match loader.available() {
		Ok(codes) => HttpResponse::Ok().body(codes.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list profiles"),
	}
}

#[put("/v1/load_languages")]
async fn put_languages(data: web::Data<SharedData>, query: web::Query<LanguageQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty language name"),
	};

	let languages: Vec<String> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();

	let settings = DetectorSettings { languages, ..data.settings.clone() };
	let root = data.profile_root.clone();
	let detector = match web::block(move || Detector::from_settings(&settings, root)).await {
		Ok(Ok(detector)) => detector,
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(format!("Failed to load languages: {e}")),
		Err(e) => return HttpResponse::InternalServerError().body(format!("Loader task failed: {e}")),
	};

	let mut current = match data.detector.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Detector lock failed"),
	};
	info!("serving languages {:?}", detector.languages());
	*current = Arc::new(detector);

	HttpResponse::Ok().body("Languages loaded successfully")
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_detect)
		.service(post_detect)
		.service(get_languages)
		.service(get_profiles)
		.service(put_languages);
}

/// Main entry point for the server.
///
/// Builds the detector once from the settings and profile directory, then
/// starts an Actix-web HTTP server sharing it between workers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let settings = match &args.settings {
		Some(path) => DetectorSettings::from_json_file(path).map_err(std::io::Error::other)?,
		None => DetectorSettings::default(),
	};
	let detector = Detector::from_settings(&settings, &args.profiles).map_err(|e| {
		error!("cannot start detector: {e}");
		std::io::Error::other(e)
	})?;
	info!("loaded {} languages from {}", detector.languages().len(), args.profiles.display());

	let shared_data = web::Data::new(SharedData {
		detector: RwLock::new(Arc::new(detector)),
		settings,
		profile_root: args.profiles,
	});

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "POST", "PUT"]))
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
