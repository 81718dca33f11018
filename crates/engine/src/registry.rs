//! Static table of every engine operation, addressable by name.
//!
//! Adapters (HTTP, CLI, MCP) list tools with [`all`] and call them with
//! [`invoke`] using plain JSON. Requests are deserialised into the tool's
//! request type; the reply is the serialised [`ToolResult`].

use std::fmt;

use common::{ErrorCode, Tool, ToolResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::crypto::{Decryptor, Encryptor};
use crate::digest::Hasher;
use crate::identifier::{UlidGenerator, UuidGenerator};
use crate::radix::BaseConverter;
use crate::toolbox::Toolbox;

/// Errors from registry lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No tool is registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Grouping used by adapters when listing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Generators,
    Converters,
    Cryptography,
}

/// JSON entry point for one tool.
pub type Handler = fn(&Toolbox, Value) -> Value;

/// Metadata and entry point of a registered tool.
#[derive(Clone, Copy, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    #[serde(skip)]
    handler: Handler,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    /// Run this tool on a JSON request.
    pub fn invoke(&self, toolbox: &Toolbox, request: Value) -> Value {
        (self.handler)(toolbox, request)
    }
}

static TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: UuidGenerator::NAME,
        title: "UUID generator",
        description: "Generate nil, max, v3, v4, v5 or v7 UUIDs.",
        category: Category::Generators,
        handler: invoke_uuid,
    },
    ToolDescriptor {
        name: UlidGenerator::NAME,
        title: "ULID generator",
        description: "Generate random, min or max ULIDs.",
        category: Category::Generators,
        handler: invoke_ulid,
    },
    ToolDescriptor {
        name: Hasher::NAME,
        title: "Hash generator",
        description: "MD5 / SHA-1 / SHA-2 digest or HMAC of text, as lowercase hex.",
        category: Category::Cryptography,
        handler: invoke_hash,
    },
    ToolDescriptor {
        name: BaseConverter::NAME,
        title: "Number base converter",
        description: "Re-encode an integer between bases 1 and 64.",
        category: Category::Converters,
        handler: invoke_base,
    },
    ToolDescriptor {
        name: Encryptor::NAME,
        title: "Text encryption",
        description: "Encrypt text with AES-CBC, AES-GCM, 3DES or RC4.",
        category: Category::Cryptography,
        handler: invoke_encrypt,
    },
    ToolDescriptor {
        name: Decryptor::NAME,
        title: "Text decryption",
        description: "Decrypt text produced by the encryption tool.",
        category: Category::Cryptography,
        handler: invoke_decrypt,
    },
];

fn invoke_uuid(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.uuid, request)
}

fn invoke_ulid(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.ulid, request)
}

fn invoke_hash(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.hash, request)
}

fn invoke_base(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.base, request)
}

fn invoke_encrypt(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.encrypt, request)
}

fn invoke_decrypt(toolbox: &Toolbox, request: Value) -> Value {
    dispatch(&toolbox.decrypt, request)
}

fn dispatch<T>(tool: &T, request: Value) -> Value
where
    T: Tool,
    T::Request: DeserializeOwned,
    T::Response: Serialize,
{
    let result = match serde_json::from_value::<T::Request>(request) {
        Ok(request) => tool.execute(request),
        Err(e) => {
            // The serde message may quote request fields, which can be secrets.
            warn!(tool = T::NAME, category = ?e.classify(), "malformed request");
            ToolResult::failure(ErrorCode::InputNotValid)
        }
    };
    serde_json::to_value(&result).unwrap_or_else(|_| {
        json!({ "payload": null, "failed": true, "errors": [ErrorCode::Unknown] })
    })
}

/// Every registered tool, in listing order.
pub fn all() -> &'static [ToolDescriptor] {
    TOOLS
}

/// Look up a tool by name.
pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Run the tool called `name` on a JSON request.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownTool`] if no tool has that name. Failures of
/// the tool itself are reported inside the returned envelope.
pub fn invoke(toolbox: &Toolbox, name: &str, request: Value) -> Result<Value, RegistryError> {
    let tool = find(name).ok_or_else(|| RegistryError::UnknownTool(name.to_owned()))?;
    Ok(tool.invoke(toolbox, request))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::EngineConfig;

    fn toolbox() -> Toolbox {
        Toolbox::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = all().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(all().len(), 6);
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("hash.compute").unwrap().category, Category::Cryptography);
        assert!(find("ip.lookup").is_none());
        assert_eq!(
            invoke(&toolbox(), "ip.lookup", json!({})),
            Err(RegistryError::UnknownTool("ip.lookup".into()))
        );
    }

    #[test]
    fn descriptors_serialise_without_handler() {
        let json = serde_json::to_value(find("base.convert").unwrap()).unwrap();
        assert_eq!(json["name"], "base.convert");
        assert_eq!(json["category"], "converters");
        assert!(json.get("handler").is_none());
    }

    #[test]
    fn hash_over_json() {
        let reply = invoke(
            &toolbox(),
            "hash.compute",
            json!({"text": "test-text", "algorithm": "md5"}),
        )
        .unwrap();
        assert_eq!(reply["failed"], false);
        assert_eq!(reply["payload"]["digest"], "cf0feea200efdea7d8580c7d4ef57ced");
    }

    #[test]
    fn base_over_json() {
        let reply = invoke(
            &toolbox(),
            "base.convert",
            json!({"value": "1234", "from_base": 10, "to_base": 40}),
        )
        .unwrap();
        assert_eq!(reply["payload"], json!({"value": "ei", "base": 40}));
    }

    #[test]
    fn failure_envelope_over_json() {
        let reply = invoke(
            &toolbox(),
            "uuid.generate",
            json!({"version": "v5", "name": "no namespace"}),
        )
        .unwrap();
        assert_eq!(reply["failed"], true);
        assert_eq!(reply["errors"], json!(["NamespaceEmpty"]));
        assert_eq!(reply["payload"]["ids"], json!([]));
    }

    #[test]
    fn malformed_request_is_input_not_valid() {
        let reply = invoke(&toolbox(), "cipher.encrypt", json!({"text": 5})).unwrap();
        assert_eq!(reply["errors"], json!(["InputNotValid"]));
    }

    #[test]
    fn cipher_round_trip_over_json() {
        let tb = toolbox();
        let encrypted = invoke(
            &tb,
            "cipher.encrypt",
            json!({"text": "Hello World", "key": "test-key", "algorithm": "3des-cbc", "encoding": "hex"}),
        )
        .unwrap();
        let cipher_text = encrypted["payload"]["cipher_text"].as_str().unwrap();

        let decrypted = invoke(
            &tb,
            "cipher.decrypt",
            json!({"cipher_text": cipher_text, "key": "test-key", "algorithm": "3des-cbc", "encoding": "hex"}),
        )
        .unwrap();
        assert_eq!(decrypted["payload"]["text"], "Hello World");
    }

    #[test]
    fn ulid_over_json() {
        let reply = invoke(&toolbox(), "ulid.generate", json!({"kind": "min", "count": 2})).unwrap();
        assert_eq!(
            reply["payload"]["ids"],
            json!(["00000000000000000000000000", "00000000000000000000000000"])
        );
    }

    #[test]
    fn oversized_batch_over_json_is_rejected() {
        let reply = invoke(
            &toolbox(),
            "ulid.generate",
            json!({"kind": "max", "count": u32::MAX}),
        )
        .unwrap();
        assert_eq!(reply["failed"], true);
        assert_eq!(reply["errors"], json!(["InputNotValid"]));
    }

    #[test]
    fn uuid_style_over_json() {
        let reply = invoke(
            &toolbox(),
            "uuid.generate",
            json!({"version": "nil", "style": "urn"}),
        )
        .unwrap();
        assert_eq!(
            reply["payload"]["formatted"],
            json!(["urn:uuid:00000000-0000-0000-0000-000000000000"])
        );
    }
}
