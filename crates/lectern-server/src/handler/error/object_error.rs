//! Object store error to HTTP error conversion.

use lectern_object::{Error as ObjectError, ErrorKind as ObjectErrorKind};

use super::http_error::{Error as HttpError, ErrorKind};

impl From<ObjectError> for HttpError<'static> {
    fn from(error: ObjectError) -> Self {
        match error.kind() {
            ObjectErrorKind::NotFound => ErrorKind::NotFound.with_context(error.to_string()),

            ObjectErrorKind::Configuration => ErrorKind::Configuration
                .with_context(error.to_string()),

            ObjectErrorKind::Transport => ErrorKind::Transport
                .with_message("Failed to retrieve the object")
                .with_context(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        let not_found = HttpError::from(ObjectError::not_found("missing"));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let configuration = HttpError::from(ObjectError::configuration("unknown bucket"));
        assert_eq!(configuration.kind(), ErrorKind::Configuration);

        let transport = HttpError::from(ObjectError::transport("connection reset"));
        assert_eq!(transport.kind(), ErrorKind::Transport);
        assert!(transport.context().unwrap().contains("connection reset"));
    }
}
