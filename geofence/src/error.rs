#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeofenceError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl GeofenceError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type GeofenceResult<T> = Result<T, GeofenceError>;

/// Rejects NaN and infinite values.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> GeofenceResult<f64> {
    if !value.is_finite() {
        return Err(GeofenceError::invalid_input(
            field,
            format!("expected a finite number, got {value}"),
        ));
    }

    Ok(value)
}
