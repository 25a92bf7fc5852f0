use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Characters the instrument protocol uses as separators.
const RESERVED: [char; 6] = ['.', '_', ':', '-', '*', '+'];

/// Creates a `Bitstream` at compile time from a string of `0` and `1`.
///
/// Whitespace and `_` may be used to group bits and are ignored. Any other
/// character is a compile error.
///
/// # Examples
///
/// ```ignore
/// use arbwave::bits;
///
/// let frame = bits!("1 0111_1111 00");
/// assert_eq!(frame.len(), 11);
/// ```
#[proc_macro]
pub fn bits(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let bit_str = input.value();

    match parse_bits(&bit_str) {
        Ok(bits) => {
            let expanded = quote! {
                {
                    ::arbwave::Bitstream::from_bits(&[#(#bits),*])
                }
            };
            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid bit string '{}': {}", bit_str, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

/// Checks an upload identifier at compile time and expands to the `&str`.
///
/// The name must be non-empty and free of `. _ : - * +`.
///
/// # Examples
///
/// ```ignore
/// use arbwave::wave_name;
///
/// let name: &str = wave_name!("carrierLF");
/// ```
#[proc_macro]
pub fn wave_name(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let name = input.value();

    match check_name(&name) {
        Ok(()) => TokenStream::from(quote! { #input }),
        Err(e) => {
            let error_msg = format!("Invalid waveform name '{}': {}", name, e);
            TokenStream::from(quote! {
                compile_error!(#error_msg)
            })
        }
    }
}

fn parse_bits(s: &str) -> Result<Vec<u8>, String> {
    let bits = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| match c {
            '0' => Ok(0u8),
            '1' => Ok(1u8),
            other => Err(format!("unexpected character '{}'", other)),
        })
        .collect::<Result<Vec<u8>, String>>()?;

    if bits.is_empty() {
        return Err("no bits".to_string());
    }
    Ok(bits)
}

fn check_name(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("empty name".to_string());
    }
    match s.chars().find(|c| RESERVED.contains(c)) {
        Some(c) => Err(format!("reserved character '{}'", c)),
        None => Ok(()),
    }
}
