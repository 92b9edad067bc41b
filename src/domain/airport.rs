// Airport domain model
use serde::Serialize;

/// Reference data for a flight origin or destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase_fields() {
        let airport = Airport {
            code: "DEN".to_string(),
            name: "Denver International".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            latitude: 39.86,
            longitude: -104.67,
        };

        let json = serde_json::to_value(&airport).unwrap();
        assert_eq!(json["code"], "DEN");
        assert_eq!(json["city"], "Denver");
        assert_eq!(json["latitude"], 39.86);
        assert_eq!(json["longitude"], -104.67);
    }
}
