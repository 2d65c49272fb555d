use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, GenericArgument, LitStr, PathArguments, Type, TypeArray, TypeSlice};

pub(crate) struct FieldMetadata {
    pub(crate) name: String,
    pub(crate) annotation: Option<LitStr>,
    pub(crate) kind: TokenStream,
}

pub(crate) fn decode_field(field: &Field) -> syn::Result<FieldMetadata> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(
            field,
            "`Mapped` can only be derived on structs with named fields",
        ));
    };
    let mut annotation: Option<LitStr> = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let Ok(value) = attr.parse_args::<LitStr>() else {
            return Err(syn::Error::new_spanned(
                attr,
                "Error while parsing `orm`, use it like: `#[orm(\"varchar(64) not null\")]`",
            ));
        };
        if annotation.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "A field can carry only one `orm` annotation",
            ));
        }
        annotation = Some(value);
    }
    let extends = annotation.as_ref().is_some_and(|v| {
        v.value()
            .to_lowercase()
            .split_whitespace()
            .any(|word| word == "extends")
    });
    let kind = if extends {
        let ty = unwrap_option(&field.ty);
        quote!(::tabula::ValueKind::Composite(<#ty as ::tabula::Mapped>::fields))
    } else {
        value_kind(&field.ty)
    };
    let name = ident.to_string();
    let name = name.strip_prefix("r#").map(str::to_owned).unwrap_or(name);
    Ok(FieldMetadata {
        name,
        annotation,
        kind,
    })
}

fn unwrap_option(ty: &Type) -> &Type {
    if let Type::Path(path) = ty {
        if let Some(last) = path.path.segments.last() {
            if last.ident == "Option" {
                if let Some(inner) = single_argument(&last.arguments) {
                    return unwrap_option(inner);
                }
            }
        }
    }
    ty
}

fn single_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = arguments else {
        return None;
    };
    arguments.args.iter().find_map(|v| match v {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_byte(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.is_ident("u8"))
}

/// Infers the `ValueKind` of a field from its declared type.
pub(crate) fn value_kind(ty: &Type) -> TokenStream {
    let kind = match ty {
        Type::Reference(reference) => return value_kind(&reference.elem),
        Type::Group(group) => return value_kind(&group.elem),
        Type::Paren(paren) => return value_kind(&paren.elem),
        Type::Slice(TypeSlice { elem, .. }) | Type::Array(TypeArray { elem, .. })
            if is_byte(elem) =>
        {
            quote!(Bytes)
        }
        Type::Path(path) => {
            let Some(last) = path.path.segments.last() else {
                return quote!(::tabula::ValueKind::Other);
            };
            match last.ident.to_string().as_str() {
                "Option" | "Box" | "Rc" | "Arc" | "Cow" => {
                    match single_argument(&last.arguments) {
                        Some(inner) => return value_kind(inner),
                        None => quote!(Other),
                    }
                }
                "Vec" if single_argument(&last.arguments).is_some_and(is_byte) => quote!(Bytes),
                "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => quote!(Int),
                "i64" | "u64" | "isize" | "usize" => quote!(BigInt),
                "f32" => quote!(Float),
                "f64" => quote!(Double),
                "bool" => quote!(Bool),
                "String" | "str" | "char" => quote!(Text),
                "PrimitiveDateTime" | "OffsetDateTime" | "Date" | "Time" => quote!(Time),
                _ => quote!(Other),
            }
        }
        _ => quote!(Other),
    };
    quote!(::tabula::ValueKind::#kind)
}
