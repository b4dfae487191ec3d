//! Asset error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};

impl From<lectern_asset::Error> for HttpError<'static> {
    fn from(error: lectern_asset::Error) -> Self {
        match error {
            lectern_asset::Error::Validation(message) => ErrorKind::BadRequest.with_message(message),

            lectern_asset::Error::MalformedAsset(context) => ErrorKind::MalformedAsset
                .with_context(context),

            lectern_asset::Error::Serialization(context) => ErrorKind::InternalServerError
                .with_message("Failed to produce the transformed asset")
                .with_context(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let error = HttpError::from(lectern_asset::Error::Validation("object key is required".into()));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("object key is required"));
    }

    #[test]
    fn malformed_asset_is_server_error() {
        let error = HttpError::from(lectern_asset::Error::MalformedAsset("bad xref".into()));
        assert_eq!(error.kind(), ErrorKind::MalformedAsset);
        assert!(error.kind().is_server_error());
        assert_eq!(error.message(), None);
    }
}
