use std::error::Error;

use ride_summary::{
    data_types::common::{TopN, Year, YearFilter},
    App, DashboardError,
};
use rocket::http::{ContentType, Status};
use rocket::State;
use serde::Serialize;

#[macro_use]
extern crate rocket;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Cross-Origin-Resource-Sharing Fairing",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

type JsonResponse = (Status, (ContentType, String));

fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn respond<T: Serialize>(result: ride_summary::Result<T>) -> JsonResponse {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => (Status::Ok, (ContentType::JSON, json)),
            Err(err) => (
                Status::InternalServerError,
                (ContentType::JSON, error_body(&err.to_string())),
            ),
        },
        Err(err) => {
            let status = if err.is_client_error() {
                Status::BadRequest
            } else {
                Status::InternalServerError
            };

            (status, (ContentType::JSON, error_body(&err.to_string())))
        }
    }
}

fn parse_top_n(n: Option<&str>, app: &App) -> ride_summary::Result<TopN> {
    n.map_or(Ok(TopN(app.config().top_n)), str::parse)
}

fn parse_filter(year: Option<&str>) -> ride_summary::Result<Option<YearFilter>> {
    year.map(str::parse).transpose()
}

#[options("/<_..>")]
fn all_options() {
    /* Intentionally left empty */
}

#[get("/years")]
fn years(app: &State<App>) -> JsonResponse {
    respond(app.years())
}

#[get("/monthly_summary/<year>")]
fn monthly_summary(year: Year, app: &State<App>) -> JsonResponse {
    respond(app.monthly_summary(year))
}

#[get("/top_rides?<n>&<year>")]
fn top_rides(n: Option<&str>, year: Option<&str>, app: &State<App>) -> JsonResponse {
    respond(parse_top_n(n, app).and_then(|n| {
        let filter = match parse_filter(year)? {
            Some(filter) => filter,
            None => app.default_filter()?,
        };
        app.top_rides(n, filter)
    }))
}

#[get("/top_speeds?<n>")]
fn top_speeds(n: Option<&str>, app: &State<App>) -> JsonResponse {
    respond(parse_top_n(n, app).and_then(|n| app.top_speeds(n)))
}

#[get("/top_days?<n>")]
fn top_days(n: Option<&str>, app: &State<App>) -> JsonResponse {
    respond(parse_top_n(n, app).and_then(|n| app.top_days(n)))
}

#[get("/monthly_totals")]
fn monthly_totals(app: &State<App>) -> JsonResponse {
    respond(app.monthly_totals())
}

#[get("/last_4_weeks")]
fn last_4_weeks(app: &State<App>) -> JsonResponse {
    respond(app.recent_activity())
}

#[get("/summary_metrics?<year>")]
fn summary_metrics(year: Option<&str>, app: &State<App>) -> JsonResponse {
    respond(
        parse_filter(year).and_then(|filter| app.summary_metrics(filter.unwrap_or_default())),
    )
}

#[get("/dashboard?<year>&<n>&<filter>")]
fn dashboard(
    year: Option<&str>,
    n: Option<&str>,
    filter: Option<&str>,
    app: &State<App>,
) -> JsonResponse {
    let selection = || -> ride_summary::Result<_> {
        let year = year
            .map(|year| {
                year.trim().parse::<Year>().map_err(|_| {
                    DashboardError::InvalidParameter(format!("unknown year '{year}'"))
                })
            })
            .transpose()?;
        let n = n.map(str::parse::<TopN>).transpose()?;

        Ok((year, n, parse_filter(filter)?))
    };

    respond(selection().and_then(|(year, n, filter)| app.dashboard(year, n, filter)))
}

#[post("/reload")]
fn reload(app: &State<App>) -> JsonResponse {
    respond(app.reload().map(|table| serde_json::json!({ "rides": table.len() })))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let app = App::from_current_dir()?;

    let _rocket = rocket::build()
        .attach(Cors)
        .manage(app)
        .mount(
            "/",
            routes![
                years,
                monthly_summary,
                top_rides,
                top_speeds,
                top_days,
                monthly_totals,
                last_4_weeks,
                summary_metrics,
                dashboard,
                reload,
                all_options
            ],
        )
        .launch()
        .await?;

    Ok(())
}
