//! Tool catalogue and argument parsing

use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::Coordinate;

pub const FIND_SUNSHINE: &str = "find_sunshine";
pub const GET_WEATHER_AT_LOCATION: &str = "get_weather_at_location";
pub const GET_CURRENT_LOCATION: &str = "get_current_location";

/// A parsed `tools/call` request
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    FindSunshine { radius_km: f64 },
    WeatherAtLocation(Coordinate),
    CurrentLocation,
}

#[derive(Debug, Deserialize)]
struct FindSunshineArgs {
    radius_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherAtLocationArgs {
    lat: f64,
    lon: f64,
}

impl ToolCall {
    /// Resolve a tool name and its arguments.
    ///
    /// `default_radius_km` applies when `find_sunshine` is called without a
    /// radius. The error string is suitable for an invalid-params response.
    pub fn parse(
        name: &str,
        arguments: Option<Value>,
        default_radius_km: f64,
    ) -> Result<Self, String> {
        let arguments = match arguments {
            None | Some(Value::Null) => json!({}),
            Some(value) => value,
        };

        match name {
            FIND_SUNSHINE => {
                let args: FindSunshineArgs = serde_json::from_value(arguments)
                    .map_err(|e| format!("Invalid arguments for {FIND_SUNSHINE}: {e}"))?;
                Ok(Self::FindSunshine {
                    radius_km: args.radius_km.unwrap_or(default_radius_km),
                })
            }
            GET_WEATHER_AT_LOCATION => {
                let args: WeatherAtLocationArgs = serde_json::from_value(arguments)
                    .map_err(|e| format!("Invalid arguments for {GET_WEATHER_AT_LOCATION}: {e}"))?;
                Ok(Self::WeatherAtLocation(Coordinate::new(args.lat, args.lon)))
            }
            GET_CURRENT_LOCATION => Ok(Self::CurrentLocation),
            other => Err(format!("Unknown tool: {other}")),
        }
    }
}

/// Tool descriptors returned by `tools/list`
#[must_use]
pub fn tool_definitions(default_radius_km: f64) -> Vec<Value> {
    vec![
        json!({
            "name": FIND_SUNSHINE,
            "description": "Find the best sunshine locations within a specified radius. \
                Returns the current location, the best locations and the number checked.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "radius_km": {
                        "type": "number",
                        "description": "Search radius in kilometers",
                        "default": default_radius_km,
                        "minimum": 0
                    }
                }
            }
        }),
        json!({
            "name": GET_WEATHER_AT_LOCATION,
            "description": "Get weather data and score for a specific location.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "lat": {"type": "number", "description": "Latitude coordinate"},
                    "lon": {"type": "number", "description": "Longitude coordinate"}
                },
                "required": ["lat", "lon"]
            }
        }),
        json!({
            "name": GET_CURRENT_LOCATION,
            "description": "Get the current location using system tools.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        }),
    ]
}

/// Successful tool result carrying `payload` as text and structured content
#[must_use]
pub fn tool_success(payload: Value) -> Value {
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": payload,
        "isError": false
    })
}

/// Failed tool result; the message is shown to the calling agent
#[must_use]
pub fn tool_error(message: impl Into<String>) -> Value {
    json!({
        "content": [{"type": "text", "text": message.into()}],
        "isError": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_find_sunshine_defaults_radius() {
        assert_eq!(
            ToolCall::parse(FIND_SUNSHINE, None, 100.0).unwrap(),
            ToolCall::FindSunshine { radius_km: 100.0 }
        );
        assert_eq!(
            ToolCall::parse(FIND_SUNSHINE, Some(json!({})), 75.0).unwrap(),
            ToolCall::FindSunshine { radius_km: 75.0 }
        );
        assert_eq!(
            ToolCall::parse(FIND_SUNSHINE, Some(json!({"radius_km": 50})), 100.0).unwrap(),
            ToolCall::FindSunshine { radius_km: 50.0 }
        );
    }

    #[test]
    fn test_weather_at_location_arguments() {
        let call =
            ToolCall::parse(GET_WEATHER_AT_LOCATION, Some(json!({"lat": 1.5, "lon": -2})), 100.0)
                .unwrap();
        assert_eq!(call, ToolCall::WeatherAtLocation(Coordinate::new(1.5, -2.0)));
    }

    #[rstest]
    #[case(GET_WEATHER_AT_LOCATION, None)]
    #[case(GET_WEATHER_AT_LOCATION, Some(json!({"lat": 1.0})))]
    #[case(GET_WEATHER_AT_LOCATION, Some(json!({"lat": "north", "lon": 1.0})))]
    #[case(FIND_SUNSHINE, Some(json!({"radius_km": "far"})))]
    #[case("get_forecast", None)]
    fn test_invalid_calls(#[case] name: &str, #[case] arguments: Option<Value>) {
        assert!(ToolCall::parse(name, arguments, 100.0).is_err());
    }

    #[test]
    fn test_definitions_cover_every_tool() {
        let definitions = tool_definitions(60.0);
        let names: Vec<String> = definitions
            .iter()
            .map(|tool| tool["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![FIND_SUNSHINE, GET_WEATHER_AT_LOCATION, GET_CURRENT_LOCATION]
        );
        assert_eq!(
            definitions[0]["inputSchema"]["properties"]["radius_km"]["default"],
            json!(60.0)
        );
    }

    #[test]
    fn test_result_shapes() {
        let ok = tool_success(json!({"lat": 1.0, "lon": 2.0}));
        assert_eq!(ok["isError"], json!(false));
        assert_eq!(ok["structuredContent"]["lat"], json!(1.0));
        assert_eq!(ok["content"][0]["type"], json!("text"));

        let failed = tool_error("boom");
        assert_eq!(failed["isError"], json!(true));
        assert_eq!(failed["content"][0]["text"], json!("boom"));
    }
}
