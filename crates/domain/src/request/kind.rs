//! Request protocol kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol a saved request talks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Plain HTTP
    #[default]
    Http,
    /// gRPC
    Grpc,
    /// WebSocket
    Websocket,
    /// Socket.IO
    Socketio,
    /// GraphQL
    Graphql,
    /// MQTT
    Mqtt,
    /// AI model endpoint
    Ia,
    /// Model Context Protocol
    Mcp,
}

impl RequestType {
    /// Returns all request types in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Http,
            Self::Grpc,
            Self::Websocket,
            Self::Socketio,
            Self::Graphql,
            Self::Mqtt,
            Self::Ia,
            Self::Mcp,
        ]
    }

    /// Returns the method label a new request of this type starts with.
    #[must_use]
    pub const fn default_method(self) -> &'static str {
        match self {
            Self::Http => "GET",
            Self::Grpc => "GRPC",
            Self::Websocket => "WS",
            Self::Socketio => "SOCKETIO",
            Self::Graphql => "GRAPHQL",
            Self::Mqtt => "MQTT",
            Self::Ia => "IA",
            Self::Mcp => "MCP",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Grpc => "gRPC",
            Self::Websocket => "WebSocket",
            Self::Socketio => "Socket.IO",
            Self::Graphql => "GraphQL",
            Self::Mqtt => "MQTT",
            Self::Ia => "IA",
            Self::Mcp => "MCP",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
