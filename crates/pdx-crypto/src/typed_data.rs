//! Typed-message model.
//!
//! A message is a set of named, typed fields grouped into a primary struct
//! and a `StarkNetDomain` domain-separation struct, with a type-dependency
//! graph. Field order is declared order and is hash-significant; the
//! constructor rejects messages whose values do not cover their declared
//! fields exactly, reference undeclared types, or form a reference cycle.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SchemaError;
use crate::felt::Felt;

/// Name of the domain-separation struct.
pub const DOMAIN_TYPE: &str = "StarkNetDomain";

/// The closed set of field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A raw field element (numbers, pre-encoded short strings).
    Felt,
    /// A short string, shortstring-encoded before hashing.
    ShortString,
    /// Reference to another declared type, struct-hashed recursively.
    Struct(String),
}

impl FieldType {
    /// Token used inside type signatures.
    fn signature_token(&self) -> &str {
        match self {
            Self::Felt => "felt",
            Self::ShortString => "string",
            Self::Struct(name) => name,
        }
    }
}

/// One `(fieldName, fieldType)` pair.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

/// An ordered sequence of field definitions.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<(&str, FieldType)>) -> Self {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, ty)| FieldDef {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
        }
    }
}

/// A field value prior to felt encoding.
#[derive(Debug, Clone)]
pub enum Value {
    Felt(Felt),
    Uint(u128),
    Text(String),
    Struct(BTreeMap<String, Value>),
}

/// A schema-validated structured message ready for hashing.
#[derive(Debug, Clone)]
pub struct TypedMessage {
    types: BTreeMap<String, TypeDefinition>,
    primary_type: String,
    domain: BTreeMap<String, Value>,
    message: BTreeMap<String, Value>,
}

impl TypedMessage {
    /// Build and validate a typed message.
    ///
    /// Checks, in order: every declared type reference resolves, the type
    /// graph is acyclic, and the domain/message values cover their declared
    /// fields exactly with matching value kinds.
    pub fn new(
        types: Vec<TypeDefinition>,
        primary_type: impl Into<String>,
        domain: BTreeMap<String, Value>,
        message: BTreeMap<String, Value>,
    ) -> Result<Self, SchemaError> {
        let types: BTreeMap<String, TypeDefinition> =
            types.into_iter().map(|t| (t.name.clone(), t)).collect();
        let msg = Self {
            types,
            primary_type: primary_type.into(),
            domain,
            message,
        };

        // All struct references must resolve before anything else.
        for def in msg.types.values() {
            for field in &def.fields {
                if let FieldType::Struct(referenced) = &field.ty {
                    if !msg.types.contains_key(referenced) {
                        return Err(SchemaError::UnknownType(referenced.clone()));
                    }
                }
            }
        }

        for name in msg.types.keys() {
            msg.check_acyclic(name, &mut Vec::new())?;
        }

        msg.type_def(DOMAIN_TYPE)?;
        msg.type_def(&msg.primary_type)?;
        msg.validate_values(DOMAIN_TYPE, &msg.domain)?;
        msg.validate_values(&msg.primary_type, &msg.message)?;

        Ok(msg)
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn domain_values(&self) -> &BTreeMap<String, Value> {
        &self.domain
    }

    pub fn message_values(&self) -> &BTreeMap<String, Value> {
        &self.message
    }

    /// Look up a declared type.
    pub fn type_def(&self, name: &str) -> Result<&TypeDefinition, SchemaError> {
        self.types
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Deterministic dependency ordering for `name`: the type itself first,
    /// then every transitively referenced type sorted alphabetically.
    pub fn resolve_dependencies(&self, name: &str) -> Result<Vec<String>, SchemaError> {
        let mut deps = BTreeSet::new();
        let mut stack = vec![name.to_string()];
        while let Some(current) = stack.pop() {
            let def = self.type_def(&current)?;
            for field in &def.fields {
                if let FieldType::Struct(referenced) = &field.ty {
                    if referenced != name && deps.insert(referenced.clone()) {
                        stack.push(referenced.clone());
                    }
                }
            }
        }
        let mut ordered = vec![name.to_string()];
        ordered.extend(deps);
        Ok(ordered)
    }

    /// Canonical signature string: `"Name(f1:t1,f2:t2,...)"` in declared
    /// field order.
    pub fn type_signature(&self, name: &str) -> Result<String, SchemaError> {
        let def = self.type_def(name)?;
        let fields: Vec<String> = def
            .fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.ty.signature_token()))
            .collect();
        Ok(format!("{}({})", def.name, fields.join(",")))
    }

    /// Full encoded type string: the type's own signature followed by its
    /// dependencies' signatures in [`resolve_dependencies`] order.
    pub fn encode_type(&self, name: &str) -> Result<String, SchemaError> {
        let mut out = String::new();
        for dep in self.resolve_dependencies(name)? {
            out.push_str(&self.type_signature(&dep)?);
        }
        Ok(out)
    }

    fn check_acyclic(&self, name: &str, path: &mut Vec<String>) -> Result<(), SchemaError> {
        if path.iter().any(|p| p == name) {
            return Err(SchemaError::CyclicTypes(name.to_string()));
        }
        path.push(name.to_string());
        let def = self.type_def(name)?;
        for field in &def.fields {
            if let FieldType::Struct(referenced) = &field.ty {
                self.check_acyclic(referenced, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    fn validate_values(
        &self,
        type_name: &str,
        values: &BTreeMap<String, Value>,
    ) -> Result<(), SchemaError> {
        let def = self.type_def(type_name)?;
        for field in &def.fields {
            let value = values
                .get(&field.name)
                .ok_or_else(|| SchemaError::MissingField {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                })?;
            let matches = match (&field.ty, value) {
                (FieldType::Felt, Value::Felt(_) | Value::Uint(_) | Value::Text(_)) => true,
                (FieldType::ShortString, Value::Text(_)) => true,
                (FieldType::Struct(referenced), Value::Struct(nested)) => {
                    self.validate_values(referenced, nested)?;
                    true
                }
                _ => false,
            };
            if !matches {
                return Err(SchemaError::TypeMismatch {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                });
            }
        }
        for key in values.keys() {
            if !def.fields.iter().any(|f| &f.name == key) {
                return Err(SchemaError::UnexpectedField {
                    type_name: type_name.to_string(),
                    field: key.clone(),
                });
            }
        }
        Ok(())
    }
}
