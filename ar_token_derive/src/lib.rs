/**
 * The derive macro implementation that implements the trait 'TokenKind' for a
 * token-kind enum.
 */

extern crate proc_macro;
extern crate syn;
extern crate quote;
extern crate proc_macro2;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{parse_macro_input, ItemEnum, LitStr, Fields, Ident, Error, Result};
use quote::quote;

// Identifier for the front-end token library
const FRONT_LIBRARY_NAME: &str = "ar_token";
// Attribute name for a raw-string token
const ATTRIBUTE_TOKEN: &str = "token";
// Attribute name for a C-style identifier
const ATTRIBUTE_IDENT: &str = "ident";
// Attribute name for a decimal number
const ATTRIBUTE_NUMBER: &str = "number";

enum RuleDefinition {
    Literal(LitStr),
    Identifier,
    Number,
}

struct KindData {
    enum_name: Ident,
    variants: Vec<Ident>,
    rules: Vec<(Ident, RuleDefinition)>,
}

#[proc_macro_derive(TokenKind, attributes(
    token,
    ident,
    number,
))]
pub fn ar_token_kind(item: TokenStream) -> TokenStream {
    let enm = parse_macro_input!(item as ItemEnum);
    match parse_attributes(&enm) {
        Ok(data) => generate_code(data).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_code(data: KindData) -> TokenStream2 {
    // Identifier for the front-end token library
    let front_library = quote::format_ident!("{}", FRONT_LIBRARY_NAME);

    let enum_name = data.enum_name;

    let name_arms = data.variants.iter().map(|v| {
        let name = v.to_string();
        quote!{ #enum_name::#v => #name, }
    });

    let rules = data.rules.iter().map(|(v, rule)| match rule {
        RuleDefinition::Literal(text) => quote!{
            ::#front_library::LexRule::Literal(#text, #enum_name::#v)
        },
        RuleDefinition::Identifier => quote!{
            ::#front_library::LexRule::Identifier(#enum_name::#v)
        },
        RuleDefinition::Number => quote!{
            ::#front_library::LexRule::Number(#enum_name::#v)
        },
    });

    quote!{
        impl ::#front_library::TokenKind for #enum_name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            fn rules() -> ::std::vec::Vec<::#front_library::LexRule<Self>> {
                vec![#(#rules),*]
            }
        }
    }
}

fn parse_attributes(enm: &ItemEnum) -> Result<KindData> {
    let enum_name = enm.ident.clone();
    let mut variants = Vec::new();
    let mut rules = Vec::new();

    if enm.variants.is_empty() {
        return Err(Error::new_spanned(&enm.ident, "A token kind needs at least one variant!"));
    }

    for variant in &enm.variants {
        // Only basic enum variants (without fields) can be token kinds
        match variant.fields {
            Fields::Unit => { },
            _ => return Err(Error::new_spanned(variant, "Token kinds can only be unit-like variants!")),
        }

        let variant_ident = variant.ident.clone();
        variants.push(variant_ident.clone());

        for attr in &variant.attrs {
            if attr.path.is_ident(ATTRIBUTE_TOKEN) {
                let token = attr.parse_args::<LitStr>()?;
                if token.value().is_empty() {
                    return Err(Error::new_spanned(token, "'token' requires a non-empty literal!"));
                }
                rules.push((variant_ident.clone(), RuleDefinition::Literal(token)));
            }
            else if attr.path.is_ident(ATTRIBUTE_IDENT) {
                if !attr.tokens.is_empty() {
                    return Err(Error::new_spanned(attr, "'ident' requires no arguments!"));
                }
                rules.push((variant_ident.clone(), RuleDefinition::Identifier));
            }
            else if attr.path.is_ident(ATTRIBUTE_NUMBER) {
                if !attr.tokens.is_empty() {
                    return Err(Error::new_spanned(attr, "'number' requires no arguments!"));
                }
                rules.push((variant_ident.clone(), RuleDefinition::Number));
            }
        }
    }

    Ok(KindData{ enum_name, variants, rules, })
}
