use std::fmt;
use serde_json::Value;
use crate::manager_owm::models::ErrorPayload;

#[derive(Debug)]
pub enum OWMError {
    MissingApiKey,
    NotFound(Option<Value>),
    Upstream { status: u16, details: Option<Value> },
    Transport(String),
    Document(String),
}

impl OWMError {
    /// Classifies a non success response from OpenWeatherMap
    ///
    /// The provider reports unknown cities both through the status code and through the
    /// `cod`/`message` fields of its error document, the latter as a string or a number.
    ///
    /// # Arguments
    ///
    /// * 'status' - http status of the response
    /// * 'details' - the error document, if the body was json
    pub fn from_status(status: u16, details: Option<Value>) -> Self {
        let payload = details
            .clone()
            .and_then(|d| serde_json::from_value::<ErrorPayload>(d).ok());

        let not_found = status == 404
            || payload.as_ref().is_some_and(|p| {
                p.cod == Some(404) || p.message.as_deref() == Some("city not found")
            });

        if not_found {
            OWMError::NotFound(details)
        } else {
            OWMError::Upstream { status, details }
        }
    }

    /// Error document returned by the provider, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            OWMError::NotFound(d) => d.as_ref(),
            OWMError::Upstream { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::MissingApiKey => write!(f, "OWMError::MissingApiKey"),
            OWMError::NotFound(_) => write!(f, "OWMError::NotFound"),
            OWMError::Upstream { status, .. } => write!(f, "OWMError::Upstream: status {}", status),
            OWMError::Transport(e) => write!(f, "OWMError::Transport: {}", e),
            OWMError::Document(e) => write!(f, "OWMError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Document(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_by_status() {
        assert!(matches!(OWMError::from_status(404, None), OWMError::NotFound(None)));
    }

    #[test]
    fn test_not_found_by_payload() {
        let e = OWMError::from_status(400, Some(json!({"cod": "404", "message": "whatever"})));
        assert!(matches!(e, OWMError::NotFound(_)));

        let e = OWMError::from_status(400, Some(json!({"cod": 404})));
        assert!(matches!(e, OWMError::NotFound(_)));

        let e = OWMError::from_status(400, Some(json!({"cod": "400", "message": "city not found"})));
        assert!(matches!(e, OWMError::NotFound(_)));
    }

    #[test]
    fn test_other_failures() {
        let details = json!({"cod": 401, "message": "Invalid API key"});
        let e = OWMError::from_status(401, Some(details.clone()));
        assert!(matches!(e, OWMError::Upstream { status: 401, .. }));
        assert_eq!(e.details(), Some(&details));

        let e = OWMError::from_status(502, Some(json!("bad gateway")));
        assert!(matches!(e, OWMError::Upstream { status: 502, .. }));
    }
}
