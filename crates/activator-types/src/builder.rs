use crate::{
    comparer::TypeComparer,
    error::TypeResolutionError,
    members::{
        Accessibility, ConstructorBody, ConstructorDefinition, CustomBody, FieldDefinition,
        Parameter,
    },
    object::Object,
    runtime::RuntimeType,
    value::Value,
    TypeDefinition, TypeDescription, TypeKind,
};
use activator_utils::FieldIndex;
use std::sync::Arc;

enum PendingBody {
    /// Assign each argument to the field whose name matches the parameter's,
    /// ignoring ASCII case.
    ByName,
    Custom(CustomBody),
}

struct PendingConstructor {
    parameters: Vec<Parameter>,
    accessibility: Accessibility,
    body: PendingBody,
}

/// Declares a type and produces its [`TypeDescription`].
///
/// ```
/// use activator_types::{RuntimeType, TypeBuilder};
///
/// let point = TypeBuilder::class("Geometry", "Point")
///     .field("Label", RuntimeType::String)
///     .field("X", RuntimeType::Int32)
///     .default_constructor()
///     .constructor([("label", RuntimeType::String), ("x", RuntimeType::Int32)])
///     .build()
///     .unwrap();
/// assert_eq!(point.definition().constructors.len(), 2);
/// ```
pub struct TypeBuilder {
    namespace: Option<String>,
    name: String,
    kind: TypeKind,
    is_abstract: bool,
    extends: Option<TypeDescription>,
    fields: Vec<FieldDefinition>,
    constructors: Vec<PendingConstructor>,
}

impl TypeBuilder {
    fn new(namespace: &str, name: &str, kind: TypeKind) -> Self {
        Self {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.to_string(),
            kind,
            is_abstract: false,
            extends: None,
            fields: vec![],
            constructors: vec![],
        }
    }

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, TypeKind::Class)
    }

    /// Value types always get a public parameterless constructor unless one
    /// is declared explicitly.
    pub fn value_type(namespace: &str, name: &str) -> Self {
        Self::new(namespace, name, TypeKind::ValueType)
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(mut self, base: &TypeDescription) -> Self {
        self.extends = Some(base.clone());
        self
    }

    pub fn field(mut self, name: &str, ty: RuntimeType) -> Self {
        self.fields.push(FieldDefinition {
            name: name.to_string(),
            ty,
        });
        self
    }

    pub fn default_constructor(self) -> Self {
        self.push_constructor(vec![], Accessibility::Public, PendingBody::ByName)
    }

    pub fn constructor<I, S>(self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (S, RuntimeType)>,
        S: Into<String>,
    {
        self.push_constructor(
            collect_parameters(parameters),
            Accessibility::Public,
            PendingBody::ByName,
        )
    }

    pub fn non_public_constructor<I, S>(self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (S, RuntimeType)>,
        S: Into<String>,
    {
        self.push_constructor(
            collect_parameters(parameters),
            Accessibility::NonPublic,
            PendingBody::ByName,
        )
    }

    pub fn constructor_with<I, S, F>(self, parameters: I, body: F) -> Self
    where
        I: IntoIterator<Item = (S, RuntimeType)>,
        S: Into<String>,
        F: Fn(&mut Object, &[Value]) + Send + Sync + 'static,
    {
        self.push_constructor(
            collect_parameters(parameters),
            Accessibility::Public,
            PendingBody::Custom(Arc::new(body)),
        )
    }

    fn push_constructor(
        mut self,
        parameters: Vec<Parameter>,
        accessibility: Accessibility,
        body: PendingBody,
    ) -> Self {
        self.constructors.push(PendingConstructor {
            parameters,
            accessibility,
            body,
        });
        self
    }

    pub fn build(self) -> Result<TypeDescription, TypeResolutionError> {
        let full_name = match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        };
        let invalid = |reason: &str| TypeResolutionError::InvalidDefinition {
            type_name: full_name.clone(),
            reason: reason.to_string(),
        };

        if let Some(base) = &self.extends {
            if self.kind == TypeKind::ValueType {
                return Err(invalid("value types cannot declare a base type"));
            }
            if base.is_value_type() {
                return Err(invalid("cannot derive from a value type"));
            }
        }

        let mut fields = self
            .extends
            .as_ref()
            .map(|b| b.definition().fields.clone())
            .unwrap_or_default();
        for field in self.fields {
            if fields.iter().any(|f| f.name == field.name) {
                return Err(TypeResolutionError::DuplicateField {
                    type_name: full_name.clone(),
                    field: field.name,
                });
            }
            fields.push(field);
        }

        let mut pending = self.constructors;
        if self.kind == TypeKind::ValueType && !pending.iter().any(|c| c.parameters.is_empty()) {
            pending.push(PendingConstructor {
                parameters: vec![],
                accessibility: Accessibility::Public,
                body: PendingBody::ByName,
            });
        }

        let mut constructors: Vec<ConstructorDefinition> = Vec::with_capacity(pending.len());
        for ctor in pending {
            let parameter_types: Vec<_> = ctor.parameters.iter().map(|p| p.ty.clone()).collect();
            let duplicate = constructors.iter().any(|c| {
                let existing: Vec<_> = c.parameters.iter().map(|p| p.ty.clone()).collect();
                TypeComparer::type_slices_equal(&existing, &parameter_types)
            });
            if duplicate {
                return Err(invalid("duplicate constructor signature"));
            }

            let body = match ctor.body {
                PendingBody::Custom(body) => ConstructorBody::Custom(body),
                PendingBody::ByName => {
                    let assignments = ctor
                        .parameters
                        .iter()
                        .map(|p| -> Result<FieldIndex, TypeResolutionError> {
                            let index = fields
                                .iter()
                                .position(|f| f.name.eq_ignore_ascii_case(&p.name))
                                .ok_or_else(|| {
                                    TypeResolutionError::FieldNotFound(format!(
                                        "{}::{}",
                                        full_name, p.name
                                    ))
                                })?;
                            let field = &fields[index];
                            if !TypeComparer::is_assignable(&field.ty, &p.ty) {
                                return Err(invalid(&format!(
                                    "parameter {} of type {} cannot be stored in field {} of type {}",
                                    p.name, p.ty, field.name, field.ty
                                )));
                            }
                            Ok(FieldIndex::new(index))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    ConstructorBody::Assign(assignments.into())
                }
            };

            constructors.push(ConstructorDefinition {
                parameters: ctor.parameters,
                accessibility: ctor.accessibility,
                body,
            });
        }

        Ok(TypeDescription::new(TypeDefinition {
            namespace: self.namespace,
            name: self.name,
            kind: self.kind,
            is_abstract: self.is_abstract,
            extends: self.extends,
            fields,
            constructors,
        }))
    }
}

fn collect_parameters<I, S>(parameters: I) -> Vec<Parameter>
where
    I: IntoIterator<Item = (S, RuntimeType)>,
    S: Into<String>,
{
    parameters
        .into_iter()
        .map(|(name, ty)| Parameter::new(name, ty))
        .collect()
}
