mod decode_field;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Implements `tabula::Mapped`, one field descriptor per named field.
///
/// Fields carry their annotation in `#[orm("...")]`:
///
/// ```ignore
/// #[derive(Mapped)]
/// struct User {
///     #[orm("pk autoincr")]
///     user_id: i64,
///     #[orm("varchar(64) not null unique")]
///     email: String,
/// }
/// ```
#[proc_macro_derive(Mapped, attributes(orm))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    match mapped_impl(&item) {
        Ok(v) => v.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn mapped_impl(item: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &item.data else {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "`Mapped` can only be derived on structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "`Mapped` can only be derived on structs with named fields",
        ));
    };
    let name = &item.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let descriptors = fields
        .named
        .iter()
        .map(|field| {
            let metadata = decode_field(field)?;
            let field_name = metadata.name;
            let kind = metadata.kind;
            let annotation = match metadata.annotation {
                Some(v) => quote!(Some(#v)),
                None => quote!(None),
            };
            Ok(quote!(::tabula::FieldDescriptor::new(#field_name, #kind, #annotation)))
        })
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(quote! {
        impl #impl_generics ::tabula::Mapped for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }
            fn fields() -> ::std::vec::Vec<::tabula::FieldDescriptor> {
                vec![#(#descriptors),*]
            }
        }
    })
}
