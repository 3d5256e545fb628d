use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Expr, Field, Fields, FieldsNamed, Lit,
    MetaNameValue, Token,
};

/// `foo = "a", bar = "b"`のような、カンマで区切られた名前と値のリスト
pub(crate) type CommaPunctuatedNameValues = Punctuated<MetaNameValue, Token![,]>;

/// 構造体の名前付きフィールドから`value`フィールドを取得する。
///
/// 構造体でない場合、名前付きフィールドを持たない場合、または`value`フィールドを
/// 持たない場合はエラーを返す。
pub(crate) fn retrieve_value_field<'a>(
    input: &'a DeriveInput,
    macro_name: &str,
) -> syn::Result<&'a Field> {
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                format!("{} is expected a struct that has named fields", macro_name),
            ))
        }
    };

    fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| *ident == "value"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                format!(
                    "{} is expected a struct that has the `value` field",
                    macro_name
                ),
            )
        })
}

/// 指定された名前の属性に定義された、名前と値のリストを取得する。
pub(crate) fn retrieve_name_values(
    attrs: &[Attribute],
    attr_name: &str,
) -> Option<CommaPunctuatedNameValues> {
    for attr in attrs {
        if attr.path().is_ident(attr_name) {
            if let Ok(name_values) = attr.parse_args_with(Punctuated::parse_terminated) {
                return Some(name_values);
            }
        }
    }

    None
}

/// 名前と値のリストから、指定された名前の文字列リテラルの値を取得する。
pub(crate) fn retrieve_str_of_name(
    name_values: &CommaPunctuatedNameValues,
    name: &str,
) -> Option<String> {
    for name_value in name_values {
        if name_value.path.is_ident(name) {
            if let Expr::Lit(expr_lit) = &name_value.value {
                if let Lit::Str(lit_str) = &expr_lit.lit {
                    return Some(lit_str.value());
                }
            }
        }
    }

    None
}
