//! Capability extensions.
//!
//! A [`CapabilityExtension`] is the member surface derived from a finished
//! generator: one stub member per vector, named `<language>_<vector>`, and
//! one real accessor per cluster. A host verb representation adopts the
//! surface and supplies its own values for the stubs it implements; the
//! extension only guarantees the complete, correctly named set of members.
//!
//! ```rust
//! use vv_core::{AspectSpec, Position};
//! use vv_generator::{MemberValue, VerbvectorGenerator};
//!
//! let mut generator = VerbvectorGenerator::new();
//! generator.set_language("Latin").unwrap();
//! generator
//!     .expand_all(&AspectSpec::new().with("voice", ["active", "passive"]), Position::StartWith)
//!     .unwrap();
//!
//! let extension = generator.build_extension().unwrap();
//! assert!(extension.responds_to("latin_active_voice"));
//! assert_eq!(extension.call("latin_passive_voice").unwrap(), MemberValue::Unit);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::generator::{GeneratorError, VerbvectorGenerator};

/// Accessor returning the raw ordered vector set.
pub const VECTOR_LIST_MEMBER: &str = "vector_list";

/// Accessor returning the bare names declared as stubs.
pub const RESPONDABLE_METHODS_MEMBER: &str = "respondable_methods";

/// One member of the extension surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionMember {
    /// Placeholder for a conjugated form; does nothing.
    Stub,
    /// Real accessor returning a captured list.
    Computed(Vec<String>),
}

/// Value produced by calling a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberValue<'a> {
    /// A stub ran; there is no meaningful value.
    Unit,
    /// A computed accessor's list.
    List(&'a [String]),
}

/// Member surface derived from a finished generator.
#[derive(Debug, Clone)]
pub struct CapabilityExtension {
    language: String,
    vector_list: Vec<String>,
    respondable_methods: Vec<String>,
    members: BTreeMap<String, ExtensionMember>,
}

impl CapabilityExtension {
    /// Build the extension for `generator`.
    ///
    /// Stubs go in first, then clusters, then the two built-in accessors;
    /// later entries replace earlier ones of the same name, so real
    /// accessors always win over stubs.
    pub fn from_generator(generator: &VerbvectorGenerator) -> Result<Self, GeneratorError> {
        let language = generator
            .language()
            .ok_or(GeneratorError::LanguageNotSet)?
            .to_string();
        let prefix = language.to_lowercase();

        let vector_list = generator.vector_set().to_vec();
        let mut members = BTreeMap::new();

        for vector in &vector_list {
            members.insert(member_name(&prefix, vector), ExtensionMember::Stub);
        }

        for (name, snapshot) in generator.clusters() {
            if members.contains_key(name) {
                warn!(cluster = %name, "cluster accessor replaces a stub member");
            }
            members.insert(name.clone(), ExtensionMember::Computed(snapshot.clone()));
        }

        let mut seen = HashSet::new();
        let respondable_methods: Vec<String> = vector_list
            .iter()
            .filter(|vector| seen.insert(*vector))
            .filter(|vector| {
                members.get(&member_name(&prefix, vector)) == Some(&ExtensionMember::Stub)
            })
            .cloned()
            .collect();

        for builtin in [VECTOR_LIST_MEMBER, RESPONDABLE_METHODS_MEMBER] {
            if generator.clusters().contains_key(builtin) {
                warn!(cluster = builtin, "cluster is shadowed by a built-in accessor");
            }
        }
        members.insert(
            VECTOR_LIST_MEMBER.to_string(),
            ExtensionMember::Computed(vector_list.clone()),
        );
        members.insert(
            RESPONDABLE_METHODS_MEMBER.to_string(),
            ExtensionMember::Computed(respondable_methods.clone()),
        );

        debug!(
            language = %language,
            stubs_count = respondable_methods.len(),
            clusters_count = generator.clusters().len(),
            "capability extension built"
        );

        Ok(Self {
            language,
            vector_list,
            respondable_methods,
            members,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The raw ordered vector set the extension was built from.
    pub fn vector_list(&self) -> &[String] {
        &self.vector_list
    }

    /// Bare (unprefixed) vector names declared as stub members.
    ///
    /// One entry per stub, in first-occurrence order of the vector list,
    /// even when the vector set holds a vector more than once.
    pub fn respondable_methods(&self) -> &[String] {
        &self.respondable_methods
    }

    /// A cluster accessor's snapshot.
    pub fn cluster(&self, name: &str) -> Option<&[String]> {
        match self.members.get(name) {
            Some(ExtensionMember::Computed(list))
                if name != VECTOR_LIST_MEMBER && name != RESPONDABLE_METHODS_MEMBER =>
            {
                Some(list)
            }
            _ => None,
        }
    }

    /// Whether a member of this name exists.
    pub fn responds_to(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn member(&self, name: &str) -> Option<&ExtensionMember> {
        self.members.get(name)
    }

    /// Every member name, sorted.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Call a member by name.
    pub fn call(&self, name: &str) -> Result<MemberValue<'_>, GeneratorError> {
        match self.members.get(name) {
            Some(ExtensionMember::Stub) => Ok(MemberValue::Unit),
            Some(ExtensionMember::Computed(list)) => Ok(MemberValue::List(list)),
            None => Err(GeneratorError::UnknownMember(name.to_string())),
        }
    }

    /// Hand the surface to a host that supplies values of type `T`.
    pub fn adopt<T>(self) -> AdoptedSurface<T> {
        AdoptedSurface {
            extension: self,
            overrides: HashMap::new(),
        }
    }
}

fn member_name(prefix: &str, vector: &str) -> String {
    format!("{}_{}", prefix, vector)
}

/// What a member resolves to on an adopted surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a, T> {
    /// The host's value for an overridden stub.
    Host(&'a T),
    /// The extension's own behavior.
    Extension(MemberValue<'a>),
}

/// A capability extension adopted by a host verb representation.
///
/// The host overrides stub members with its own implementations; members it
/// leaves alone keep their extension behavior.
#[derive(Debug, Clone)]
pub struct AdoptedSurface<T> {
    extension: CapabilityExtension,
    overrides: HashMap<String, T>,
}

impl<T> AdoptedSurface<T> {
    pub fn extension(&self) -> &CapabilityExtension {
        &self.extension
    }

    /// Override a stub member, returning any previous override.
    ///
    /// Only stub members can be overridden: cluster and built-in accessors
    /// are real implementations.
    pub fn override_member(&mut self, name: &str, value: T) -> Result<Option<T>, GeneratorError> {
        match self.extension.member(name) {
            Some(ExtensionMember::Stub) => Ok(self.overrides.insert(name.to_string(), value)),
            _ => Err(GeneratorError::UnknownMember(name.to_string())),
        }
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.extension.responds_to(name)
    }

    /// Resolve a member: host override first, then the extension.
    pub fn resolve(&self, name: &str) -> Result<Resolved<'_, T>, GeneratorError> {
        if let Some(value) = self.overrides.get(name) {
            return Ok(Resolved::Host(value));
        }
        self.extension.call(name).map(Resolved::Extension)
    }

    /// Stub members the host has not implemented yet, sorted.
    pub fn unimplemented(&self) -> Vec<&str> {
        self.extension
            .members
            .iter()
            .filter(|(name, member)| {
                **member == ExtensionMember::Stub && !self.overrides.contains_key(name.as_str())
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
