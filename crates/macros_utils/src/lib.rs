//! Small declarative helpers shared by the upwatch HTTP apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub mod __private {
    pub use actix_web::web::ServiceConfig;
}

/// Generate a `pub fn routes(config: &mut ServiceConfig)` for the current module.
///
/// `route name` registers an actix handler generated by the `#[get]`/`#[post]`
/// attribute macros; `module name` mounts the `routes` function of a child
/// module, which usually comes from another `routes!` invocation.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     module history,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($($entries:tt)*) => {
        pub fn routes(config: &mut $crate::__private::ServiceConfig) {
            $crate::__register_routes!(config; $($entries)*);
        }
    };
}

#[cfg(feature = "actix")]
#[doc(hidden)]
#[macro_export]
macro_rules! __register_routes {
    ($config:ident;) => {};
    ($config:ident; route $name:ident $(, $($rest:tt)*)?) => {
        $config.service($name);
        $crate::__register_routes!($config; $($($rest)*)?);
    };
    ($config:ident; module $name:ident $(, $($rest:tt)*)?) => {
        $config.configure($name::routes);
        $crate::__register_routes!($config; $($($rest)*)?);
    };
}
