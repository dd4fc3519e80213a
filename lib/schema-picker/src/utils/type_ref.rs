use graphql_parser::schema::Type;

pub static BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Upper bound for `[...]` / `!` wrappers around a named type.
/// Real schemas rarely go past 3 or 4.
pub const MAX_TYPE_WRAPPING_DEPTH: usize = 32;

pub type TypeRef = Type<'static, String>;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("invalid type reference '{type_ref}': more than {MAX_TYPE_WRAPPING_DEPTH} list/non-null wrappers")]
pub struct InvalidTypeReference {
    pub type_ref: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrapper {
    List,
    NonNull,
}

#[inline]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// [[Person!]]! -> Person
pub fn root_type_name(type_ref: &TypeRef) -> Result<&str, InvalidTypeReference> {
    unwrap_type(type_ref).map(|(name, _)| name)
}

/// Rebuilds `type_ref` around `next_name`, keeping every list/non-null wrapper in place.
pub fn replace_root_type_name(
    type_ref: &TypeRef,
    next_name: &str,
) -> Result<TypeRef, InvalidTypeReference> {
    let (_, wrappers) = unwrap_type(type_ref)?;

    Ok(wrappers
        .into_iter()
        .rev()
        .fold(Type::NamedType(next_name.to_string()), |inner, wrapper| {
            match wrapper {
                Wrapper::List => Type::ListType(Box::new(inner)),
                Wrapper::NonNull => Type::NonNullType(Box::new(inner)),
            }
        }))
}

fn unwrap_type(type_ref: &TypeRef) -> Result<(&str, Vec<Wrapper>), InvalidTypeReference> {
    let mut wrappers = Vec::new();
    let mut current = type_ref;

    loop {
        if wrappers.len() > MAX_TYPE_WRAPPING_DEPTH {
            return Err(InvalidTypeReference {
                type_ref: type_ref.to_string(),
            });
        }

        match current {
            Type::NamedType(name) => return Ok((name.as_str(), wrappers)),
            Type::ListType(inner) => {
                wrappers.push(Wrapper::List);
                current = inner;
            }
            Type::NonNullType(inner) => {
                wrappers.push(Wrapper::NonNull);
                current = inner;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeRef {
        Type::NamedType(name.to_string())
    }

    fn list(inner: TypeRef) -> TypeRef {
        Type::ListType(Box::new(inner))
    }

    fn non_null(inner: TypeRef) -> TypeRef {
        Type::NonNullType(Box::new(inner))
    }

    #[test]
    fn resolves_root_name_through_modifiers() {
        assert_eq!(root_type_name(&named("Person")), Ok("Person"));
        assert_eq!(root_type_name(&non_null(named("Person"))), Ok("Person"));
        assert_eq!(root_type_name(&list(named("Person"))), Ok("Person"));
        assert_eq!(
            root_type_name(&non_null(list(list(non_null(named("Person")))))),
            Ok("Person")
        );
    }

    #[test]
    fn rejects_pathologically_deep_references() {
        let mut type_ref = named("Person");
        for _ in 0..=MAX_TYPE_WRAPPING_DEPTH {
            type_ref = list(type_ref);
        }

        assert!(root_type_name(&type_ref).is_err());
        assert!(replace_root_type_name(&type_ref, "Human").is_err());
    }

    #[test]
    fn accepts_references_at_the_depth_limit() {
        let mut type_ref = named("Person");
        for _ in 0..MAX_TYPE_WRAPPING_DEPTH {
            type_ref = list(type_ref);
        }

        assert_eq!(root_type_name(&type_ref), Ok("Person"));
    }

    #[test]
    fn replaces_root_name_and_keeps_wrappers() {
        let original = non_null(list(non_null(named("Person"))));
        let renamed = replace_root_type_name(&original, "Human").unwrap();

        assert_eq!(renamed, non_null(list(non_null(named("Human")))));
        assert_eq!(renamed.to_string(), "[Human!]!");
    }

    #[test]
    fn builtin_scalars() {
        for name in ["String", "Int", "Float", "Boolean", "ID"] {
            assert!(is_builtin_scalar(name), "{name} should be built-in");
        }

        assert!(!is_builtin_scalar("DateTime"));
        assert!(!is_builtin_scalar("string"));
        assert!(!is_builtin_scalar("Person"));
    }
}
