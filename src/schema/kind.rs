/// Node kinds understood by the interpreter
///
/// The card family and the image leaf have dedicated rendering rules; any
/// other tag falls back to `Passthrough`, which uses the tag itself as the
/// output element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    Card,
    CardHeader,
    CardTitle,
    CardDescription,
    CardContent,
    CardFooter,
    /// Media leaf; its children are never rendered
    Image,
    /// Unrecognised kind, rendered as an element named after the tag
    Passthrough(&'a str),
}

impl<'a> NodeKind<'a> {
    pub fn from_tag(tag: &'a str) -> Self {
        match tag {
            "Card" => Self::Card,
            "CardHeader" => Self::CardHeader,
            "CardTitle" => Self::CardTitle,
            "CardDescription" => Self::CardDescription,
            "CardContent" => Self::CardContent,
            "CardFooter" => Self::CardFooter,
            "img" => Self::Image,
            other => Self::Passthrough(other),
        }
    }

    /// Output element tag
    pub fn element_tag(&self) -> &'a str {
        match *self {
            Self::Card | Self::CardHeader | Self::CardContent | Self::CardFooter => "div",
            Self::CardTitle => "h3",
            Self::CardDescription => "p",
            Self::Image => "img",
            Self::Passthrough(tag) => tag,
        }
    }

    /// Styling applied before the caller-supplied class
    pub fn base_class(&self) -> Option<&'static str> {
        match self {
            Self::Card => Some("rounded-xl border shadow-sm p-4"),
            Self::CardHeader => Some("flex flex-col space-y-1.5 p-6"),
            Self::CardTitle => Some("font-semibold leading-none tracking-tight"),
            Self::CardDescription => Some("text-sm text-muted-foreground"),
            Self::CardContent => Some("p-6 pt-0"),
            Self::CardFooter => Some("flex items-center p-6 pt-0"),
            Self::Image | Self::Passthrough(_) => None,
        }
    }

    /// Whether children are rendered inside this kind
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Passthrough(_))
    }
}
