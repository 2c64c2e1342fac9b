use std::collections::HashMap;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::token::Bracket;
use syn::{
    Expr, ExprArray, ExprLit, FnArg, Ident, Item, ItemFn, Lit, LitBool, LitStr, Meta, PatType, Token, Type,
    parse_macro_input,
};

const KNOWN_KEYS: &[&str] = &[
    "name",
    "aliases",
    "usage",
    "description",
    "player_only",
    "min_args",
    "max_args",
    "flags",
    "permissions",
];

struct CommandAttributes(syn::punctuated::Punctuated<syn::Meta, Token![,]>);

impl syn::parse::Parse for CommandAttributes {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        Ok(Self(input.parse_terminated(syn::Meta::parse, Token![,])?))
    }
}

/// How the annotated function wants to be called.
enum Shape {
    None,
    Context,
    Unsupported(String),
}

/// A proc macro applied to functions that will create a type that implements the
/// `CommandHandler` trait. The function stays as written; the generated type carries the
/// declared metadata and forwards invocations to it:
///
/// ```ignore
/// #[command(name = "give", aliases = ["g"], usage = "<item> [amount]", min_args = 1, max_args = 2,
///           flags = ["silent", "to:"], permissions = ["game.give"], player_only = true)]
/// async fn give(ctxt: CommandContext) -> anyhow::Result<()> {}
/// ```
///
/// becomes roughly...
///
/// ```ignore
/// pub struct give_command;
///
/// impl CommandHandler for give_command {
///     fn metadata(&self) -> CommandMetadata { /* declared values */ }
///     fn parameter_shape(&self) -> ParameterShape { ParameterShape::Context }
///     async fn invoke(&self, ctxt: Option<CommandContext>) -> anyhow::Result<()> {
///         give(ctxt?).await
///     }
/// }
/// ```
///
/// Every key is optional; `name` defaults to the function name. The function may take no
/// parameters or a single `CommandContext`. Any other signature still compiles, but the
/// registry refuses to build it.
#[proc_macro_attribute]
pub fn command(attrs: TokenStream, func: TokenStream) -> TokenStream {
    let CommandAttributes(attrs) = syn::parse_macro_input!(attrs as CommandAttributes);

    let Item::Fn(item) = parse_macro_input!(func as syn::Item) else {
        return quote!(compile_error!("#[command] applied to non-function");).into();
    };

    match expand(attrs, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(attrs: Punctuated<Meta, Token![,]>, item: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    if !item.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.sig.generics,
            "#[command] functions cannot be generic",
        ));
    }

    let fn_name = &item.sig.ident;
    let vis = &item.vis;
    let struct_name = Ident::new(&format!("{}_command", item.sig.ident), Span::call_site());

    let mut fields = HashMap::new();

    for attr in attrs {
        let (path, value) = match attr {
            Meta::NameValue(meta) => (meta.path, meta.value),
            // a bare key such as `player_only` switches the option on
            Meta::Path(path) => (path, bool_expr(true)),
            Meta::List(list) => {
                return Err(syn::Error::new_spanned(list, "expected `key = value`"));
            },
        };

        let Some(ident) = path.get_ident() else {
            return Err(syn::Error::new_spanned(path, "#[command] attribute key should be an identifier"));
        };

        let key = ident.to_string();
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("unknown #[command] key `{key}`"),
            ));
        }

        fields.insert(key, value);
    }

    let fn_name_str = fn_name.to_string();
    let name = fields.remove("name").unwrap_or_else(|| str_expr(&fn_name_str));
    let aliases = fields.remove("aliases").unwrap_or_else(empty_array_expr);
    let usage = fields.remove("usage").unwrap_or_else(|| str_expr(""));
    let description = fields.remove("description").unwrap_or_else(|| str_expr(""));
    let player_only = fields.remove("player_only").unwrap_or_else(|| bool_expr(false));
    let min_args = fields.remove("min_args").unwrap_or_else(|| syn::parse_quote!(0));
    let max_args = fields.remove("max_args").unwrap_or_else(|| syn::parse_quote!(-1));
    let flags = fields.remove("flags").unwrap_or_else(empty_array_expr);
    let permissions = fields.remove("permissions").unwrap_or_else(empty_array_expr);

    let shape = parameter_shape(&item.sig.inputs)?;
    let awaited = item.sig.asyncness.map(|_| quote!(.await));

    let (shape_tokens, invoke_body) = match shape {
        Shape::None => (
            quote!(::cmdframe_core::command::ParameterShape::None),
            quote! {
                let _ = ctxt;
                #fn_name()#awaited?;
                Ok(())
            },
        ),
        Shape::Context => (
            quote!(::cmdframe_core::command::ParameterShape::Context),
            quote! {
                let Some(ctxt) = ctxt else {
                    ::cmdframe_core::anyhow::bail!("command `{}` expects a CommandContext but none was provided", #fn_name_str);
                };
                #fn_name(ctxt)#awaited?;
                Ok(())
            },
        ),
        Shape::Unsupported(signature) => (
            quote!(::cmdframe_core::command::ParameterShape::Unsupported(::std::string::String::from(#signature))),
            quote! {
                let _ = ctxt;
                let _ = #fn_name;
                ::cmdframe_core::anyhow::bail!("command `{}` has an unsupported signature: ({})", #fn_name_str, #signature)
            },
        ),
    };

    let following = quote! {
        #[allow(non_camel_case_types)]
        #vis struct #struct_name;

        #[::cmdframe_core::async_trait]
        impl ::cmdframe_core::command::CommandHandler for #struct_name {
            fn metadata(&self) -> ::cmdframe_core::command::metadata::CommandMetadata {
                const ALIASES: &[&str] = &#aliases;
                const FLAGS: &[&str] = &#flags;
                const PERMISSIONS: &[&str] = &#permissions;

                ::cmdframe_core::command::metadata::CommandMetadataBuilder::new(#name)
                    .aliases(ALIASES)
                    .usage(#usage)
                    .description(#description)
                    .player_only(#player_only)
                    .min_args(#min_args)
                    .max_args(#max_args)
                    .flags(FLAGS)
                    .permissions(PERMISSIONS)
                    .build()
            }

            fn parameter_shape(&self) -> ::cmdframe_core::command::ParameterShape {
                #shape_tokens
            }

            async fn invoke(
                &self,
                ctxt: ::std::option::Option<::cmdframe_core::command::CommandContext>,
            ) -> ::cmdframe_core::anyhow::Result<()> {
                #invoke_body
            }
        }
    };

    let mut output = item.to_token_stream();
    output.extend(following);

    Ok(output)
}

fn parameter_shape(inputs: &Punctuated<FnArg, Token![,]>) -> syn::Result<Shape> {
    if inputs.is_empty() {
        return Ok(Shape::None);
    }

    if let Some(FnArg::Receiver(receiver)) = inputs.first() {
        return Err(syn::Error::new_spanned(receiver, "#[command] cannot have `self` arguments"));
    }

    if inputs.len() == 1
        && let Some(FnArg::Typed(PatType { ty, .. })) = inputs.first()
        && is_context_type(ty)
    {
        return Ok(Shape::Context);
    }

    let signature = inputs
        .iter()
        .map(|input| match input {
            FnArg::Typed(PatType { ty, .. }) => ty.to_token_stream().to_string(),
            FnArg::Receiver(receiver) => receiver.to_token_stream().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Shape::Unsupported(signature))
}

fn is_context_type(ty: &Type) -> bool {
    if let Type::Path(path) = ty
        && let Some(seg) = path.path.segments.last()
        && seg.ident == "CommandContext"
    {
        true
    } else {
        false
    }
}

fn str_expr(s: &str) -> Expr {
    Expr::Lit(ExprLit {
        attrs: Vec::new(),
        lit: Lit::Str(LitStr::new(s, Span::call_site())),
    })
}

fn bool_expr(value: bool) -> Expr {
    Expr::Lit(ExprLit {
        attrs: Vec::new(),
        lit: Lit::Bool(LitBool::new(value, Span::call_site())),
    })
}

fn empty_array_expr() -> Expr {
    Expr::Array(ExprArray {
        attrs: Default::default(),
        bracket_token: Bracket::default(),
        elems: Default::default(),
    })
}
