#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Either std or libm must be used for math operations");

macro_rules! libm_or_std {
    ( $( $fname:ident $( => $libm_name:ident )? $( : $arity:tt )? ),* $(,)? ) => {
        $(
            libm_or_std!(@make fn $fname [ $( $libm_name )? ] $( : $arity )?);
        )*
    };

    (@make fn $fname:ident [] $( : $arity:tt )?) => {
        libm_or_std!(@make fn $fname [ $fname ] $( : $arity )?);
    };

    (@make fn $fname:ident [ $libm_name:ident ]) => {
        #[inline]
        pub fn $fname(x: f64) -> f64 {
            #[cfg(feature = "std")]
            { x.$fname() }
            #[cfg(all(feature = "libm", not(feature = "std")))]
            { libm::$libm_name(x) }
        }
    };

    (@make fn $fname:ident [ $libm_name:ident ] : 2) => {
        #[inline]
        pub fn $fname(x: f64, y: f64) -> f64 {
            #[cfg(feature = "std")]
            { x.$fname(y) }
            #[cfg(all(feature = "libm", not(feature = "std")))]
            { libm::$libm_name(x, y) }
        }
    };
}

libm_or_std!(
    sin,
    cos,
    sqrt,
    abs => fabs,
    powf => pow: 2,
    copysign: 2,
    atan2: 2,
);

/// Truncating remainder, matching C's `fmod`.
#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x % y
    }
    #[cfg(all(feature = "libm", not(feature = "std")))]
    {
        libm::fmod(x, y)
    }
}
