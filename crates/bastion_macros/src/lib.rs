use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemFn, LitInt};

/// Time a function when the `perf_stats` feature is enabled.
///
/// The body is wrapped with a drop guard that logs through Bevy's `info!`
/// once the call returns, but only when it took longer than the threshold.
/// Without the feature the function is emitted unchanged.
///
/// ```ignore
/// #[profile]      // logs calls slower than 1ms
/// fn rebuild_shop() { ... }
///
/// #[profile(8)]   // logs calls slower than 8ms
/// fn write_manifest() { ... }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_profile(attr.into(), item.into()).into()
}

fn expand_profile(attr: TokenStream2, item: TokenStream2) -> TokenStream2 {
    let input = match syn::parse2::<ItemFn>(item) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        match syn::parse2::<LitInt>(attr).and_then(|lit| lit.base10_parse::<u128>()) {
            Ok(value) => value,
            Err(err) => return err.to_compile_error(),
        }
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let fn_name_str = sig.ident.to_string();

    quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            let _profile_timer = {
                struct ProfileGuard {
                    name: &'static str,
                    start: std::time::Instant,
                }
                impl Drop for ProfileGuard {
                    fn drop(&mut self) {
                        let elapsed = self.start.elapsed();
                        if elapsed.as_millis() > #threshold_ms {
                            bevy::prelude::info!("[PERF] {}: {:?}", self.name, elapsed);
                        }
                    }
                }
                ProfileGuard {
                    name: #fn_name_str,
                    start: std::time::Instant::now(),
                }
            };

            #block
        }
    }
}
