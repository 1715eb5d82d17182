use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Method, Status};
use rocket::{Request, Response};

/// Opens every response to cross-origin readers, so a viewer hosted elsewhere
/// can still call the API.
pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));

        // Preflights never reach a route; answer them here.
        if request.method() == Method::Options {
            response.set_header(Header::new("Access-Control-Max-Age", "3600"));
            response.set_status(Status::NoContent);
        }
    }
}
