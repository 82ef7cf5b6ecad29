//! Types available to the command-line tools, all in the `Fixtures`
//! namespace.
use activator_types::{
    error::TypeResolutionError, registry::TypeRegistry, RuntimeType, TypeBuilder, Value,
};
use once_cell::sync::Lazy;

const NAMESPACE: &str = "Fixtures";

static REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    let registry = TypeRegistry::new();
    if let Err(e) = register_all(&registry) {
        tracing::error!("failed to register fixture types: {}", e);
    }
    registry
});

pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

fn register_all(registry: &TypeRegistry) -> Result<(), TypeResolutionError> {
    registry.register(
        TypeBuilder::class(NAMESPACE, "Parameterless")
            .default_constructor()
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "OneParamCtor")
            .field("Value", RuntimeType::String)
            .constructor([("value", RuntimeType::String)])
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "TwoParamCtor")
            .field("StringValue", RuntimeType::String)
            .field("IntValue", RuntimeType::Int32)
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
            ])
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "MultiCtor")
            .field("StringValue", RuntimeType::String)
            .field("IntValue", RuntimeType::Int32)
            .field("DateValue", RuntimeType::DateTime)
            .constructor([("stringValue", RuntimeType::String)])
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
            ])
            .constructor([
                ("stringValue", RuntimeType::String),
                ("intValue", RuntimeType::Int32),
                ("dateValue", RuntimeType::DateTime),
            ])
            .build()?,
    )?;

    let nullable_int = RuntimeType::nullable(RuntimeType::Int32);

    registry.register(
        TypeBuilder::class(NAMESPACE, "MultiTwoParamCtor")
            .field("IntValue", RuntimeType::Int32)
            .field("StringValue", RuntimeType::String)
            .constructor([
                ("intValue", RuntimeType::Int32),
                ("stringValue", RuntimeType::String),
            ])
            // StringValue receives the nullable argument's text, empty for null.
            .constructor_with(
                [("intValue", RuntimeType::Int32), ("nullableIntValue", nullable_int)],
                |this, args| {
                    let text = match &args[1] {
                        Value::Int32(i) => i.to_string(),
                        _ => String::new(),
                    };
                    this.set_field("IntValue", args[0].clone());
                    this.set_field("StringValue", Value::from(text));
                },
            )
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "Point")
            .field("Name", RuntimeType::String)
            .field("X", RuntimeType::Int32)
            .default_constructor()
            .constructor([("name", RuntimeType::String), ("x", RuntimeType::Int32)])
            .build()?,
    )?;

    registry.register(
        TypeBuilder::value_type(NAMESPACE, "Vector")
            .field("X", RuntimeType::Int32)
            .field("Y", RuntimeType::Int32)
            .constructor([("x", RuntimeType::Int32), ("y", RuntimeType::Int32)])
            .build()?,
    )?;

    let shape = registry.register(
        TypeBuilder::class(NAMESPACE, "Shape")
            .abstract_type()
            .field("Label", RuntimeType::String)
            .constructor([("label", RuntimeType::String)])
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "Circle")
            .extends(&shape)
            .field("Radius", RuntimeType::Float64)
            .constructor([("label", RuntimeType::String), ("radius", RuntimeType::Float64)])
            .build()?,
    )?;

    registry.register(
        TypeBuilder::class(NAMESPACE, "Canvas")
            .field("Content", RuntimeType::Type(shape.clone()))
            .field("Tag", RuntimeType::Object)
            .constructor([("content", RuntimeType::Type(shape))])
            .constructor([("tag", RuntimeType::Object)])
            .build()?,
    )?;

    Ok(())
}
