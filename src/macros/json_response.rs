/// implement rocket's `Responder` for a serializable type by sending it as json
macro_rules! json_response {
    ( $($type:ty),+ $(,)? ) => {
        $(
            impl<'r> rocket::response::Responder<'r, 'static> for $type {
                fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
                    let body = match serde_json::to_string(&self) {
                        Ok(body) => body,
                        Err(error) => {
                            log::error!(target:"macros/json_response", "Error serializing response: {}", error);
                            return Err(rocket::http::Status::InternalServerError);
                        }
                    };

                    rocket::response::Response::build()
                        .header(rocket::http::ContentType::JSON)
                        .sized_body(body.len(), std::io::Cursor::new(body))
                        .ok()
                }
            }
        )+
    }
}

pub(crate) use json_response;
