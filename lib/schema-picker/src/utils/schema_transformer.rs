use graphql_parser::schema::{
    EnumType, Field, InputObjectType, InputValue, InterfaceType, ObjectType,
    ScalarType, Text, Type, TypeDefinition, UnionType,
};

#[derive(Clone, Debug)]
pub enum Transformed<T> {
    Keep,
    Replace(T),
}

#[derive(Clone, Debug)]
pub enum TransformedValue<T> {
    Keep,
    Replace(T),
}

impl<T> TransformedValue<T> {
    pub fn should_keep(&self) -> bool {
        match self {
            TransformedValue::Keep => true,
            TransformedValue::Replace(_) => false,
        }
    }

    pub fn replace_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            TransformedValue::Keep => f(),
            TransformedValue::Replace(next_value) => next_value,
        }
    }
}

impl<T> From<TransformedValue<T>> for Transformed<T> {
    fn from(val: TransformedValue<T>) -> Self {
        match val {
            TransformedValue::Keep => Transformed::Keep,
            TransformedValue::Replace(replacement) => Transformed::Replace(replacement),
        }
    }
}

impl<T> Transformed<T> {
    pub fn map<U, F>(self, f: F) -> Transformed<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Transformed::Keep => Transformed::Keep,
            Transformed::Replace(t) => Transformed::Replace(f(t)),
        }
    }
}

/// Copy-on-write visitor over type definitions.
///
/// Every hook returns `Keep` unless something below it changed, so an untouched
/// definition is never cloned. Implementors override the hooks they care about
/// and fall back to the `default_*` variants for the rest.
pub trait SchemaTransformer<'a, T: Text<'a> + Clone> {
    fn transform_type_definition(
        &mut self,
        type_def: &TypeDefinition<'a, T>,
    ) -> Transformed<TypeDefinition<'a, T>> {
        self.default_transform_type_definition(type_def)
    }

    fn default_transform_type_definition(
        &mut self,
        type_def: &TypeDefinition<'a, T>,
    ) -> Transformed<TypeDefinition<'a, T>> {
        match type_def {
            TypeDefinition::Scalar(scalar) => self
                .transform_scalar_type(scalar)
                .map(TypeDefinition::Scalar),
            TypeDefinition::Object(obj) => {
                self.transform_object_type(obj).map(TypeDefinition::Object)
            }
            TypeDefinition::Interface(interface) => self
                .transform_interface_type(interface)
                .map(TypeDefinition::Interface),
            TypeDefinition::Union(union) => {
                self.transform_union_type(union).map(TypeDefinition::Union)
            }
            TypeDefinition::Enum(enum_type) => self
                .transform_enum_type(enum_type)
                .map(TypeDefinition::Enum),
            TypeDefinition::InputObject(input) => self
                .transform_input_object_type(input)
                .map(TypeDefinition::InputObject),
        }
    }

    /// Covers declared names, field/argument type references, union members and
    /// implemented interfaces.
    fn transform_type_name(&mut self, _name: &T::Value) -> TransformedValue<T::Value> {
        TransformedValue::Keep
    }

    fn transform_type_ref(&mut self, _type_ref: &Type<'a, T>) -> TransformedValue<Type<'a, T>> {
        TransformedValue::Keep
    }

    fn transform_implemented_interfaces(
        &mut self,
        interfaces: &[T::Value],
    ) -> TransformedValue<Vec<T::Value>> {
        self.transform_list(interfaces, Self::transform_type_name)
    }

    fn transform_enum_type(&mut self, enum_type: &EnumType<'a, T>) -> Transformed<EnumType<'a, T>> {
        let name = self.transform_type_name(&enum_type.name);

        if name.should_keep() {
            return Transformed::Keep;
        }

        Transformed::Replace(EnumType {
            position: enum_type.position,
            description: enum_type.description.clone(),
            name: name.replace_or_else(|| enum_type.name.clone()),
            directives: enum_type.directives.clone(),
            values: enum_type.values.clone(),
        })
    }

    fn transform_input_object_type(
        &mut self,
        input: &InputObjectType<'a, T>,
    ) -> Transformed<InputObjectType<'a, T>> {
        let name = self.transform_type_name(&input.name);
        let fields = self.transform_input_fields(&input.fields);

        if name.should_keep() && fields.should_keep() {
            return Transformed::Keep;
        }

        Transformed::Replace(InputObjectType {
            position: input.position,
            description: input.description.clone(),
            name: name.replace_or_else(|| input.name.clone()),
            directives: input.directives.clone(),
            fields: fields.replace_or_else(|| input.fields.clone()),
        })
    }

    fn transform_interface_type(
        &mut self,
        interface: &InterfaceType<'a, T>,
    ) -> Transformed<InterfaceType<'a, T>> {
        let name = self.transform_type_name(&interface.name);
        let interfaces = self.transform_implemented_interfaces(&interface.implements_interfaces);
        let fields = self.transform_fields(&interface.fields);

        if name.should_keep() && interfaces.should_keep() && fields.should_keep() {
            return Transformed::Keep;
        }

        Transformed::Replace(InterfaceType {
            position: interface.position,
            description: interface.description.clone(),
            name: name.replace_or_else(|| interface.name.clone()),
            implements_interfaces: interfaces
                .replace_or_else(|| interface.implements_interfaces.clone()),
            directives: interface.directives.clone(),
            fields: fields.replace_or_else(|| interface.fields.clone()),
        })
    }

    fn transform_union_type(&mut self, union: &UnionType<'a, T>) -> Transformed<UnionType<'a, T>> {
        let name = self.transform_type_name(&union.name);
        let members = self.transform_list(&union.types, Self::transform_type_name);

        if name.should_keep() && members.should_keep() {
            return Transformed::Keep;
        }

        Transformed::Replace(UnionType {
            position: union.position,
            description: union.description.clone(),
            name: name.replace_or_else(|| union.name.clone()),
            directives: union.directives.clone(),
            types: members.replace_or_else(|| union.types.clone()),
        })
    }

    fn transform_scalar_type(
        &mut self,
        scalar: &ScalarType<'a, T>,
    ) -> Transformed<ScalarType<'a, T>> {
        let name = self.transform_type_name(&scalar.name);

        if name.should_keep() {
            Transformed::Keep
        } else {
            Transformed::Replace(ScalarType {
                position: scalar.position,
                description: scalar.description.clone(),
                name: name.replace_or_else(|| scalar.name.clone()),
                directives: scalar.directives.clone(),
            })
        }
    }

    fn transform_object_type(&mut self, obj: &ObjectType<'a, T>) -> Transformed<ObjectType<'a, T>> {
        let name = self.transform_type_name(&obj.name);
        let interfaces = self.transform_implemented_interfaces(&obj.implements_interfaces);
        let fields = self.transform_fields(&obj.fields);

        if name.should_keep() && interfaces.should_keep() && fields.should_keep() {
            Transformed::Keep
        } else {
            Transformed::Replace(ObjectType {
                position: obj.position,
                description: obj.description.clone(),
                name: name.replace_or_else(|| obj.name.clone()),
                implements_interfaces: interfaces
                    .replace_or_else(|| obj.implements_interfaces.clone()),
                directives: obj.directives.clone(),
                fields: fields.replace_or_else(|| obj.fields.clone()),
            })
        }
    }

    fn transform_fields(&mut self, fields: &[Field<'a, T>]) -> TransformedValue<Vec<Field<'a, T>>> {
        self.default_transform_fields(fields)
    }

    fn default_transform_fields(
        &mut self,
        fields: &[Field<'a, T>],
    ) -> TransformedValue<Vec<Field<'a, T>>> {
        self.transform_list(fields, Self::transform_field)
    }

    fn transform_field(&mut self, field: &Field<'a, T>) -> Transformed<Field<'a, T>> {
        let arguments = self.transform_input_values(&field.arguments);
        let field_type = self.transform_type_ref(&field.field_type);

        if arguments.should_keep() && field_type.should_keep() {
            Transformed::Keep
        } else {
            Transformed::Replace(Field {
                position: field.position,
                description: field.description.clone(),
                name: field.name.clone(),
                arguments: arguments.replace_or_else(|| field.arguments.clone()),
                field_type: field_type.replace_or_else(|| field.field_type.clone()),
                directives: field.directives.clone(),
            })
        }
    }

    /// Fields of an input object. Field arguments go through `transform_input_values` only.
    fn transform_input_fields(
        &mut self,
        fields: &[InputValue<'a, T>],
    ) -> TransformedValue<Vec<InputValue<'a, T>>> {
        self.transform_input_values(fields)
    }

    fn transform_input_values(
        &mut self,
        values: &[InputValue<'a, T>],
    ) -> TransformedValue<Vec<InputValue<'a, T>>> {
        self.transform_list(values, Self::transform_input_value)
    }

    fn transform_input_value(
        &mut self,
        value: &InputValue<'a, T>,
    ) -> Transformed<InputValue<'a, T>> {
        let value_type = self.transform_type_ref(&value.value_type);

        if value_type.should_keep() {
            Transformed::Keep
        } else {
            Transformed::Replace(InputValue {
                position: value.position,
                description: value.description.clone(),
                name: value.name.clone(),
                value_type: value_type.replace_or_else(|| value.value_type.clone()),
                default_value: value.default_value.clone(),
                directives: value.directives.clone(),
            })
        }
    }

    // Helper method for transforming lists
    fn transform_list<I, F, R>(&mut self, list: &[I], f: F) -> TransformedValue<Vec<I>>
    where
        I: Clone,
        F: Fn(&mut Self, &I) -> R,
        R: Into<Transformed<I>>,
    {
        let mut result = Vec::new();
        let mut has_changes = false;

        for (index, prev_item) in list.iter().enumerate() {
            match f(self, prev_item).into() {
                Transformed::Keep => {
                    if has_changes {
                        result.push(prev_item.clone());
                    }
                }
                Transformed::Replace(next_item) => {
                    if !has_changes {
                        result.reserve(list.len());
                        result.extend(list.iter().take(index).cloned());
                    }
                    result.push(next_item);
                    has_changes = true;
                }
            }
        }

        if has_changes {
            TransformedValue::Replace(result)
        } else {
            TransformedValue::Keep
        }
    }
}
