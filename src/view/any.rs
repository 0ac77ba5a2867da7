use crate::utf::*;
use crate::view::{ValidateError, View};

/// A [`View`] whose encoding is only known at runtime.
#[derive(Copy, Clone, Debug)]
pub enum AnyView<'a> {
    Utf8(View<'a, Utf8>),
    Utf16(View<'a, Utf16>),
    Utf32(View<'a, Utf32>),
}

macro_rules! dispatch {
    ($self:expr, $view:ident => $body:expr) => {
        match $self {
            AnyView::Utf8($view) => $body,
            AnyView::Utf16($view) => $body,
            AnyView::Utf32($view) => $body,
        }
    };
}

impl<'a> AnyView<'a> {
    pub const fn kind(&self) -> EncodingKind {
        match self {
            AnyView::Utf8(_) => EncodingKind::Utf8,
            AnyView::Utf16(_) => EncodingKind::Utf16,
            AnyView::Utf32(_) => EncodingKind::Utf32,
        }
    }

    pub fn validate(&self) -> bool {
        dispatch!(self, view => view.validate())
    }

    pub fn check(&self) -> Result<(), ValidateError> {
        dispatch!(self, view => view.check())
    }

    pub fn codepoints(&self) -> usize {
        dispatch!(self, view => view.codepoints())
    }

    pub fn codeunits(&self) -> usize {
        dispatch!(self, view => view.codeunits())
    }

    pub fn bytes(&self) -> usize {
        dispatch!(self, view => view.bytes())
    }

    /// Units the window would occupy once transcoded to `kind`.
    pub fn codeunits_as(&self, kind: EncodingKind) -> usize {
        match kind {
            EncodingKind::Utf8 => dispatch!(self, view => view.codeunits_in::<Utf8>()),
            EncodingKind::Utf16 => dispatch!(self, view => view.codeunits_in::<Utf16>()),
            EncodingKind::Utf32 => dispatch!(self, view => view.codeunits_in::<Utf32>()),
        }
    }

    pub fn bytes_as(&self, kind: EncodingKind) -> usize {
        self.codeunits_as(kind) * kind.unit_bytes()
    }

    pub fn to<D: Encoding, S: Sink<D::Unit>>(&self, sink: S) -> S {
        dispatch!(self, view => view.to::<D, S>(sink))
    }
}

impl<'a> From<View<'a, Utf8>> for AnyView<'a> {
    fn from(view: View<'a, Utf8>) -> Self {
        AnyView::Utf8(view)
    }
}

impl<'a> From<View<'a, Utf16>> for AnyView<'a> {
    fn from(view: View<'a, Utf16>) -> Self {
        AnyView::Utf16(view)
    }
}

impl<'a> From<View<'a, Utf32>> for AnyView<'a> {
    fn from(view: View<'a, Utf32>) -> Self {
        AnyView::Utf32(view)
    }
}
