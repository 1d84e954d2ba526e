/// a failed read is logged and treated as no data at all
macro_rules! fetch_or_empty {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                error!(target:$target, "Error getting {}, continuing without them. (error: {})", $type_str, error);
                Vec::new()
            }
        }
    }
}

macro_rules! db_handle_error_http {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err($crate::errors::Error::NotFoundError { .. }) => {
                return Err(Status::NotFound);
            }
            Err(error) => {
                error!(target:$target, "Error with {}. (error: {})", $type_str, error);
                return Err(Status::InternalServerError);
            }
        }
    }
}

pub(crate) use fetch_or_empty;
pub(crate) use db_handle_error_http;
