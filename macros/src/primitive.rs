use std::str::FromStr as _;

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned as _;
use syn::DeriveInput;

use crate::utils::{retrieve_name_values, retrieve_str_of_name, retrieve_value_field};

/// `value`メソッドの戻り値の種類
enum ValueGetter {
    /// 値を返す。
    Val,
    /// `value`フィールドの型の参照を返す。
    Ref,
    /// `value`フィールドの型と異なる参照を返す。
    RefAs(String),
}

pub(crate) fn impl_domain_primitive(input: &DeriveInput) -> syn::Result<TokenStream2> {
    const MACRO_NAME: &str = "DomainPrimitive";

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // `value`フィールドとそのフィールドに付与された`value_getter`属性を取得
    let field = retrieve_value_field(input, MACRO_NAME)?;
    let ty = &field.ty;
    let name_values = retrieve_name_values(&field.attrs, "value_getter").ok_or_else(|| {
        syn::Error::new(field.span(), "value_getter attribute should have name values")
    })?;

    // `ret`キーの値から`value`メソッドの戻り値の種類を判別
    let getter = match retrieve_str_of_name(&name_values, "ret").as_deref() {
        Some("val") => ValueGetter::Val,
        Some("ref") => match retrieve_str_of_name(&name_values, "rty") {
            Some(rty) => ValueGetter::RefAs(rty),
            None => ValueGetter::Ref,
        },
        _ => {
            return Err(syn::Error::new(
                name_values.span(),
                "ret value should be `val` or `ref`",
            ))
        }
    };

    let method = match getter {
        ValueGetter::Val => quote! {
            pub fn value(&self) -> #ty {
                self.value
            }
        },
        ValueGetter::Ref => quote! {
            pub fn value(&self) -> &#ty {
                &self.value
            }
        },
        ValueGetter::RefAs(rty) => {
            let rty = TokenStream2::from_str(&rty)
                .map_err(|_| syn::Error::new(field.span(), "rty value should be a type"))?;
            quote! {
                pub fn value(&self) -> #rty {
                    &self.value
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #method
        }
    })
}

pub(crate) fn impl_primitive_display(input: &DeriveInput) -> syn::Result<TokenStream2> {
    const MACRO_NAME: &str = "PrimitiveDisplay";

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // 構造体が`value`フィールドを持つか確認
    retrieve_value_field(input, MACRO_NAME)?;

    Ok(quote! {
        impl #impl_generics std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.value)
            }
        }
    })
}

pub(crate) fn impl_string_primitive(input: &DeriveInput) -> syn::Result<TokenStream2> {
    const MACRO_NAME: &str = "StringPrimitive";

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // 構造体が`value`フィールドを持つか確認
    retrieve_value_field(input, MACRO_NAME)?;

    // 構造体に付与された`primitive`属性から検証エラー・メッセージを構築
    let message = retrieve_error_message(input);

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new<T: std::string::ToString>(value: T) -> DomainResult<Self> {
                let value = value.to_string().trim().to_string();
                let instance = Self { value };
                match instance.validate() {
                    Ok(_) => Ok(instance),
                    Err(_) => Err(DomainError::validation().with_message(#message)),
                }
            }
        }
    })
}

/// 構造体に付与された`primitive`属性から、検証エラー・メッセージを取得する。
///
/// `message`キーの値が指定されている場合はその値を、`name`キーの値が指定されている
/// 場合はその値から生成したメッセージを返す。
fn retrieve_error_message(input: &DeriveInput) -> String {
    match retrieve_name_values(&input.attrs, "primitive") {
        Some(name_values) => match retrieve_str_of_name(&name_values, "message") {
            Some(message) => message,
            None => match retrieve_str_of_name(&name_values, "name") {
                Some(name) => format!("{}の形式が正しくありません。", name),
                None => String::from("値の形式が正しくありません。"),
            },
        },
        None => String::from("値の形式が正しくありません。"),
    }
}
