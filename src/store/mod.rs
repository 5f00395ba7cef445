use std::collections::HashMap;

use thiserror::Error;

use crate::color::Rgba;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection {collection:?} already has a mode named {name:?}")]
    DuplicateMode { collection: String, name: String },
    #[error("unknown mode index {mode} in collection {collection:?}")]
    UnknownMode { collection: String, mode: usize },
    #[error("unknown variable {path:?} in collection {collection:?}")]
    UnknownVariable { collection: String, path: String },
    #[error("variable {path:?} is {declared:?} but was written a {written:?} value")]
    ValueTypeMismatch {
        path: String,
        declared: TokenType,
        written: TokenType,
    },
    #[error("alias chain starting at {path:?} exceeds the schema depth")]
    AliasChainTooDeep { path: String },
}

/// Bridge aliases Theme, Theme aliases Base: deeper chains are schema bugs.
const MAX_ALIAS_HOPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Color,
    Float,
    String,
    Boolean,
}

/// Scope tags carried by a variable, surfaced as `$scopes` on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    WidthHeight,
    Gap,
    CornerRadius,
    TextContent,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::All => "ALL_SCOPES",
            Scope::WidthHeight => "WIDTH_HEIGHT",
            Scope::Gap => "GAP",
            Scope::CornerRadius => "CORNER_RADIUS",
            Scope::TextContent => "TEXT_CONTENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Color(Rgba),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl TokenValue {
    fn token_type(&self) -> TokenType {
        match self {
            TokenValue::Color(_) => TokenType::Color,
            TokenValue::Float(_) => TokenType::Float,
            TokenValue::Str(_) => TokenType::String,
            TokenValue::Bool(_) => TokenType::Boolean,
        }
    }
}

/// A per-mode slot: a literal of the variable's type, or a reference to
/// another variable.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeValue {
    Literal(TokenValue),
    Alias(VariableId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeId(pub usize);

/// Stable identity of a variable. Survives regeneration because variables are
/// upserted by name, never deleted and recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId {
    pub collection: CollectionId,
    index: usize,
}

#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    token_type: TokenType,
    scopes: Vec<Scope>,
    /// One slot per mode, positionally aligned with the collection's modes.
    values: Vec<Option<ModeValue>>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn value(&self, mode: ModeId) -> Option<&ModeValue> {
        self.values.get(mode.0).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    modes: Vec<String>,
    variables: Vec<Variable>,
    by_name: HashMap<String, usize>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn mode_id(&self, name: &str) -> Option<ModeId> {
        self.modes.iter().position(|m| m == name).map(ModeId)
    }

    /// Variables in creation order; the order is what keeps exports stable.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

const INITIAL_MODE_NAME: &str = "Mode 1";

/// In-memory token store: three independently-lifecycled collections of
/// typed, mode-valued, name-indexed variables. Stands in for the host's
/// variable storage; the layout builder and codec only ever talk to this.
#[derive(Debug, Default)]
pub struct TokenStore {
    collections: Vec<Collection>,
    by_name: HashMap<String, usize>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a collection by name, creating it (with one placeholder mode)
    /// if absent. Idempotent: the returned id is stable across calls.
    pub fn get_or_create_collection(&mut self, name: &str) -> CollectionId {
        if let Some(&index) = self.by_name.get(name) {
            return CollectionId(index);
        }
        let index = self.collections.len();
        self.collections.push(Collection {
            name: name.to_string(),
            modes: vec![INITIAL_MODE_NAME.to_string()],
            variables: Vec::new(),
            by_name: HashMap::new(),
        });
        self.by_name.insert(name.to_string(), index);
        tracing::debug!(collection = name, "created collection");
        CollectionId(index)
    }

    pub fn collection_id(&self, name: &str) -> Option<CollectionId> {
        self.by_name.get(name).copied().map(CollectionId)
    }

    pub fn collection(&self, id: CollectionId) -> &Collection {
        &self.collections[id.0]
    }

    pub fn collections(&self) -> impl Iterator<Item = (CollectionId, &Collection)> {
        self.collections
            .iter()
            .enumerate()
            .map(|(i, c)| (CollectionId(i), c))
    }

    pub fn rename_mode(&mut self, id: CollectionId, mode: ModeId, new_name: &str) -> StoreResult<()> {
        let collection = &mut self.collections[id.0];
        let slot = collection
            .modes
            .get_mut(mode.0)
            .ok_or_else(|| StoreError::UnknownMode {
                collection: collection.name.clone(),
                mode: mode.0,
            })?;
        *slot = new_name.to_string();
        Ok(())
    }

    /// Add a mode. Callers are expected to check `mode_id` first; a duplicate
    /// name is an error, not an upsert.
    pub fn add_mode(&mut self, id: CollectionId, name: &str) -> StoreResult<ModeId> {
        let collection = &mut self.collections[id.0];
        if collection.modes.iter().any(|m| m == name) {
            return Err(StoreError::DuplicateMode {
                collection: collection.name.clone(),
                name: name.to_string(),
            });
        }
        collection.modes.push(name.to_string());
        for variable in &mut collection.variables {
            variable.values.push(None);
        }
        Ok(ModeId(collection.modes.len() - 1))
    }

    /// Find a variable by exact path, creating it with the given type and
    /// scopes if absent. Never changes the type of an existing variable;
    /// keeping schemas stable across regenerations is the caller's job.
    pub fn upsert_variable(
        &mut self,
        id: CollectionId,
        path: &str,
        token_type: TokenType,
        scopes: &[Scope],
    ) -> VariableId {
        let collection = &mut self.collections[id.0];
        if let Some(&index) = collection.by_name.get(path) {
            return VariableId {
                collection: id,
                index,
            };
        }
        let index = collection.variables.len();
        collection.variables.push(Variable {
            name: path.to_string(),
            token_type,
            scopes: scopes.to_vec(),
            values: vec![None; collection.modes.len()],
        });
        collection.by_name.insert(path.to_string(), index);
        VariableId {
            collection: id,
            index,
        }
    }

    pub fn variable_id(&self, id: CollectionId, path: &str) -> Option<VariableId> {
        self.collections[id.0]
            .by_name
            .get(path)
            .map(|&index| VariableId {
                collection: id,
                index,
            })
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.collections[id.collection.0].variables[id.index]
    }

    /// Set one mode's value. Literals must match the variable's declared
    /// type; aliases are always accepted (their type is the target's).
    pub fn set_value(&mut self, id: VariableId, mode: ModeId, value: ModeValue) -> StoreResult<()> {
        let collection = &mut self.collections[id.collection.0];
        let variable = &mut collection.variables[id.index];
        if let ModeValue::Literal(ref literal) = value {
            let written = literal.token_type();
            if written != variable.token_type {
                return Err(StoreError::ValueTypeMismatch {
                    path: variable.name.clone(),
                    declared: variable.token_type,
                    written,
                });
            }
        }
        let slot = variable
            .values
            .get_mut(mode.0)
            .ok_or_else(|| StoreError::UnknownMode {
                collection: collection.name.clone(),
                mode: mode.0,
            })?;
        *slot = Some(value);
        Ok(())
    }

    /// Resolve a variable's value in a mode. Each alias hop is read at the
    /// same mode index when the target has one, else at the target's first
    /// mode. Chains are bounded: Theme aliases point straight at Base
    /// leaves, Bridge may alias Theme, so two hops is the schema maximum.
    pub fn resolve(&self, id: VariableId, mode: ModeId) -> StoreResult<TokenValue> {
        let mut current = id;
        let mut mode = mode;
        for _ in 0..=MAX_ALIAS_HOPS {
            match self.mode_value(current, mode)? {
                ModeValue::Literal(literal) => return Ok(literal.clone()),
                ModeValue::Alias(target) => {
                    let target_modes = self.collections[target.collection.0].modes.len();
                    if mode.0 >= target_modes {
                        mode = ModeId(0);
                    }
                    current = *target;
                }
            }
        }
        Err(StoreError::AliasChainTooDeep {
            path: self.variable(id).name.clone(),
        })
    }

    fn mode_value(&self, id: VariableId, mode: ModeId) -> StoreResult<&ModeValue> {
        let collection = &self.collections[id.collection.0];
        let variable = &collection.variables[id.index];
        variable
            .values
            .get(mode.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| StoreError::UnknownMode {
                collection: collection.name.clone(),
                mode: mode.0,
            })
    }
}
