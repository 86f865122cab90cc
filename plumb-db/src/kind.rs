pub(crate) struct UnmappedKindError(pub(crate) Vec<u8>);

pub(crate) trait Kind: 'static + Copy + std::cmp::Eq + Sized {
    const VARIANTS: &'static [Self];

    type Error: From<crate::kind::UnmappedKindError>;

    fn from_tag(tag: &[u8]) -> Option<Self>
    where
        Self: Sized;

    fn try_from_tag(tag: &[u8]) -> std::result::Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::from_tag(tag).ok_or_else(|| UnmappedKindError(tag.to_vec()).into())
    }

    fn as_tag(self) -> &'static str;
}

macro_rules! kind {
    (
        $vis:vis enum $name:ident {
            $($variant:ident = $tag:literal,)*
        }

        $err:ident => $display:literal
    ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        #[derive(Debug, thiserror::Error)]
        $vis struct $err(pub String);

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(
                        $name::$variant => $tag,
                    )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<crate::kind::UnmappedKindError> for $err {
            #[inline]
            fn from(err: crate::kind::UnmappedKindError) -> Self {
                Self(String::from_utf8_lossy(&err.0).into_owned())
            }
        }

        impl std::fmt::Display for $err {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, $display, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $err;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <Self as crate::Kind>::try_from_tag(s.as_bytes())
            }
        }

        impl crate::Kind for $name {
            type Error = $err;
            const VARIANTS: &'static [Self] = &[$($name::$variant,)*];

            fn from_tag(tag: &[u8]) -> Option<Self> {
                match tag {
                    $(
                        t if t == $tag.as_bytes() => Some($name::$variant),
                    )*
                    _ => None,
                }
            }

            fn as_tag(self) -> &'static str {
                self.as_str()
            }
        }
    };
}
