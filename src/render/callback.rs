/// Declares a reference-counted callable with identity.
///
/// The generated type wraps `Rc<dyn Fn(..) -> ..>`; clones share identity and
/// compare equal, independently built callables never do.
macro_rules! callback {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<$($gen:ident),*>: Fn($($arg:ident: $ty:ty),*) -> $ret:ty;
    ) => {
        $(#[$meta])*
        $vis struct $name<$($gen),*>(std::rc::Rc<dyn Fn($($ty),*) -> $ret>);

        impl<$($gen),*> $name<$($gen),*> {
            pub(crate) fn new(f: impl Fn($($ty),*) -> $ret + 'static) -> Self {
                Self(std::rc::Rc::new(f))
            }

            pub fn call(&self, $($arg: $ty),*) -> $ret {
                (self.0)($($arg),*)
            }

            /// True when both handles point at the same callable.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                std::rc::Rc::ptr_eq(&self.0, &other.0)
            }
        }

        impl<$($gen),*> Clone for $name<$($gen),*> {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<$($gen),*> PartialEq for $name<$($gen),*> {
            fn eq(&self, other: &Self) -> bool {
                self.ptr_eq(other)
            }
        }

        impl<$($gen),*> std::fmt::Debug for $name<$($gen),*> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use callback;
