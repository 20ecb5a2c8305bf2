use {
    crate::{arn, ConditionOp, SegmentDefault, StanzaError},
    derive_builder::Builder,
    std::{
        collections::{btree_map::Iter, BTreeMap},
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// The access classification attached to an action in its catalog entry.
/// Informational only; the builder carries it but never enforces it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AccessLevel {
    List,
    Read,
    Write,
    Tagging,
    PermissionsManagement,
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::List => f.write_str("List"),
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::Tagging => f.write_str("Tagging"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
        }
    }
}

/// A resource type an action applies to, with the required/optional flag from
/// the service reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceTypeRef {
    name: String,
    required: bool,
}

impl ResourceTypeRef {
    pub fn new<S: Into<String>>(name: S, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }
}

/// One entry of a service's action catalog.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(setter(into))]
pub struct ActionSpec {
    /// The bare action name, e.g. `GetObject`.
    name: String,

    #[builder(default)]
    description: String,

    access_level: AccessLevel,

    /// Resource types the action applies to. Empty when the action only
    /// supports the `*` resource.
    #[builder(default)]
    resource_types: Vec<ResourceTypeRef>,

    /// Condition key names applicable to the action.
    #[builder(default)]
    condition_keys: Vec<String>,
}

impl ActionSpec {
    pub fn builder() -> ActionSpecBuilder {
        ActionSpecBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    pub fn resource_types(&self) -> &[ResourceTypeRef] {
        &self.resource_types
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// One entry of a service's resource-type catalog.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(setter(into))]
pub struct ResourceTypeSpec {
    /// The resource type name, e.g. `bucket`.
    name: String,

    /// The ARN template with `${Name}` placeholders.
    arn_template: String,

    /// Condition key names valid on this resource type.
    #[builder(default)]
    condition_keys: Vec<String>,

    /// How unspecified `${Region}`/`${Account}` segments render for this
    /// resource type's documented ARN shape.
    #[builder(default)]
    segment_default: SegmentDefault,
}

impl ResourceTypeSpec {
    pub fn builder() -> ResourceTypeSpecBuilder {
        ResourceTypeSpecBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arn_template(&self) -> &str {
        &self.arn_template
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }

    #[inline]
    pub fn segment_default(&self) -> SegmentDefault {
        self.segment_default
    }

    /// Resolve this resource type's ARN template against the supplied
    /// placeholder values.
    pub fn resolve(&self, values: &BTreeMap<&str, &str>) -> Result<String, StanzaError> {
        arn::resolve(&self.arn_template, values, self.segment_default)
    }
}

/// A condition key with the default operator its catalog helper declares.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionKeySpec {
    name: String,
    default_op: ConditionOp,
}

impl ConditionKeySpec {
    pub fn new<S: Into<String>>(name: S, default_op: ConditionOp) -> Self {
        Self {
            name: name.into(),
            default_op,
        }
    }

    /// A string-valued key; defaults to `StringLike`.
    pub fn string<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::StringLike)
    }

    /// An ARN-valued key; defaults to `ArnLike`.
    pub fn arn<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::ArnLike)
    }

    /// A boolean-valued key; defaults to `Bool`.
    pub fn boolean<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::Bool)
    }

    /// A numeric key; defaults to `NumericEquals`.
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::NumericEquals)
    }

    /// A date key constrained after a point in time; defaults to `DateGreaterThan`.
    pub fn date_after<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::DateGreaterThan)
    }

    /// A date key constrained before a point in time; defaults to `DateLessThan`.
    pub fn date_before<S: Into<String>>(name: S) -> Self {
        Self::new(name, ConditionOp::DateLessThan)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn default_op(&self) -> ConditionOp {
        self.default_op
    }
}

/// The read-only action table for one service, keyed by bare action name.
/// Generated service modules build one of these once; the core only reads it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionCatalog {
    actions: BTreeMap<String, ActionSpec>,
}

impl ActionCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, ActionSpec> {
        self.actions.iter()
    }
}

impl FromIterator<ActionSpec> for ActionCatalog {
    fn from_iter<I: IntoIterator<Item = ActionSpec>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().map(|spec| (spec.name.clone(), spec)).collect(),
        }
    }
}

/// The read-only resource-type table for one service, keyed by type name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResourceTypeCatalog {
    resource_types: BTreeMap<String, ResourceTypeSpec>,
}

impl ResourceTypeCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ResourceTypeSpec> {
        self.resource_types.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.resource_types.contains_key(name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resource_types.len()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, ResourceTypeSpec> {
        self.resource_types.iter()
    }
}

impl FromIterator<ResourceTypeSpec> for ResourceTypeCatalog {
    fn from_iter<I: IntoIterator<Item = ResourceTypeSpec>>(iter: I) -> Self {
        Self {
            resource_types: iter.into_iter().map(|spec| (spec.name.clone(), spec)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            AccessLevel, ActionCatalog, ActionSpec, ConditionKeySpec, ConditionOp, ResourceTypeCatalog,
            ResourceTypeRef, ResourceTypeSpec, SegmentDefault, StanzaError,
        },
        pretty_assertions::assert_eq,
        std::collections::BTreeMap,
    };

    fn table_spec() -> ResourceTypeSpec {
        ResourceTypeSpec::builder()
            .name("table")
            .arn_template("arn:${Partition}:dynamodb:${Region}:${Account}:table/${TableName}")
            .condition_keys(vec!["aws:ResourceTag/${TagKey}".to_string()])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_action_spec_builder() {
        let spec = ActionSpec::builder()
            .name("PutItem")
            .description("Grants permission to create or replace an item in a table")
            .access_level(AccessLevel::Write)
            .resource_types(vec![ResourceTypeRef::new("table", true)])
            .condition_keys(vec!["dynamodb:LeadingKeys".to_string()])
            .build()
            .unwrap();

        assert_eq!(spec.name(), "PutItem");
        assert_eq!(spec.access_level(), AccessLevel::Write);
        assert_eq!(spec.resource_types().len(), 1);
        assert_eq!(spec.resource_types()[0].name(), "table");
        assert!(spec.resource_types()[0].required());
        assert_eq!(spec.condition_keys(), &["dynamodb:LeadingKeys".to_string()]);

        let sparse = ActionSpec::builder().name("ListTables").access_level(AccessLevel::List).build().unwrap();
        assert_eq!(sparse.description(), "");
        assert!(sparse.resource_types().is_empty());
        assert!(sparse.condition_keys().is_empty());

        let missing = ActionSpec::builder().name("PutItem").build();
        assert!(missing.is_err());
    }

    #[test_log::test]
    fn test_action_catalog_lookup() {
        let catalog: ActionCatalog = vec![
            ActionSpec::builder().name("GetItem").access_level(AccessLevel::Read).build().unwrap(),
            ActionSpec::builder().name("PutItem").access_level(AccessLevel::Write).build().unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(catalog.contains("GetItem"));
        assert!(!catalog.contains("DeleteItem"));
        assert_eq!(catalog.get("PutItem").unwrap().access_level(), AccessLevel::Write);
        assert!(catalog.get("DeleteItem").is_none());

        let names: Vec<&str> = catalog.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["GetItem", "PutItem"]);

        assert!(ActionCatalog::new().is_empty());
    }

    #[test_log::test]
    fn test_resource_type_resolve() {
        let spec = table_spec();
        assert_eq!(spec.name(), "table");
        assert_eq!(spec.segment_default(), SegmentDefault::Wildcard);

        let values = BTreeMap::from([("TableName", "orders")]);
        assert_eq!(spec.resolve(&values).unwrap(), "arn:aws:dynamodb:*:*:table/orders");

        let e = spec.resolve(&BTreeMap::new()).unwrap_err();
        assert_eq!(e, StanzaError::UnresolvedPlaceholder("TableName".to_string()));
    }

    #[test_log::test]
    fn test_resource_type_catalog_lookup() {
        let catalog: ResourceTypeCatalog = vec![table_spec()].into_iter().collect();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("table"));
        assert!(!catalog.contains("index"));
        assert_eq!(
            catalog.get("table").unwrap().arn_template(),
            "arn:${Partition}:dynamodb:${Region}:${Account}:table/${TableName}"
        );
        assert!(ResourceTypeCatalog::new().is_empty());
    }

    #[test_log::test]
    fn test_condition_key_defaults() {
        assert_eq!(ConditionKeySpec::string("aws:RequestTag/Team").default_op(), ConditionOp::StringLike);
        assert_eq!(ConditionKeySpec::arn("aws:SourceArn").default_op(), ConditionOp::ArnLike);
        assert_eq!(ConditionKeySpec::boolean("aws:SecureTransport").default_op(), ConditionOp::Bool);
        assert_eq!(ConditionKeySpec::numeric("s3:max-keys").default_op(), ConditionOp::NumericEquals);
        assert_eq!(ConditionKeySpec::date_after("aws:CurrentTime").default_op(), ConditionOp::DateGreaterThan);
        assert_eq!(ConditionKeySpec::date_before("aws:EpochTime").default_op(), ConditionOp::DateLessThan);
        assert_eq!(ConditionKeySpec::string("aws:RequestTag/Team").name(), "aws:RequestTag/Team");
    }

    #[test_log::test]
    fn test_access_level_display() {
        assert_eq!(AccessLevel::List.to_string(), "List");
        assert_eq!(AccessLevel::Read.to_string(), "Read");
        assert_eq!(AccessLevel::Write.to_string(), "Write");
        assert_eq!(AccessLevel::Tagging.to_string(), "Tagging");
        assert_eq!(AccessLevel::PermissionsManagement.to_string(), "Permissions management");
    }
}
