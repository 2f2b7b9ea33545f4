use quote::ToTokens;

/// Type descriptor built from a field's declared type.
#[derive(Debug, Clone)]
pub(crate) struct Ty {
    /// The type as written in the record
    pub(crate) ast: syn::Type,

    /// Structure of the type
    pub(crate) kind: TyKind,
}

#[derive(Debug, Clone)]
pub(crate) enum TyKind {
    /// A primitive: `bool`, `char`, integers and floats
    Scalar(syn::Ident),

    /// `String`
    Text,

    /// `Option<T>`, the nullable wrapper around any other type
    Option(Box<Ty>),

    /// A standard or `indexmap` collection. An empty argument list means the
    /// container was written without generics.
    Container {
        container: ContainerKind,
        args: Vec<TypeArg>,
    },

    /// `[T; N]`
    Array(Box<Ty>),

    /// `Box<[T]>`
    Slice(Box<Ty>),

    /// A user-defined record, identified by the last path segment
    Record(syn::Ident),

    /// Anything else: references, tuples, trait objects, standard library
    /// types that are not collections.
    Other,
}

#[derive(Debug, Clone)]
pub(crate) enum TypeArg {
    Resolved(Ty),

    /// `_`, `impl Trait` or a macro in type position. Rust has no bounded
    /// wildcard syntax, so these never resolve.
    Wildcard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Vec,
    VecDeque,
    LinkedList,
    BinaryHeap,
    HashSet,
    BTreeSet,
    IndexSet,
    HashMap,
    BTreeMap,
    IndexMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerFamily {
    Sequence,
    Set,
    Map,
}

const SCALARS: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Standard library types that are never treated as user records.
const STD_TYPES: &[&str] = &[
    "Arc", "Box", "Cell", "Cow", "Duration", "Instant", "Mutex", "NonZeroI32", "NonZeroI64",
    "NonZeroU32", "NonZeroU64", "NonZeroUsize", "Ordering", "OsString", "Path", "PathBuf",
    "PhantomData", "Range", "Rc", "RefCell", "RwLock", "SystemTime", "Weak", "Wrapping",
    "IpAddr", "Ipv4Addr", "Ipv6Addr", "SocketAddr", "Self", "str",
];

const STD_ROOTS: &[&str] = &["std", "core", "alloc"];

impl Ty {
    pub(crate) fn from_ast(ty: &syn::Type) -> Self {
        let kind = match ty {
            syn::Type::Paren(ty) => return Self::from_ast(&ty.elem),
            syn::Type::Group(ty) => return Self::from_ast(&ty.elem),
            syn::Type::Array(ty) => TyKind::Array(Box::new(Self::from_ast(&ty.elem))),
            syn::Type::Path(ty) if ty.qself.is_none() => TyKind::from_path(&ty.path),
            _ => TyKind::Other,
        };

        Self {
            ast: ty.clone(),
            kind,
        }
    }

    /// Normalized token string of the type as written.
    pub(crate) fn key(&self) -> String {
        self.ast.to_token_stream().to_string()
    }

    /// Two descriptors name the same type. Records compare by name so that
    /// `crate::User` and `User` agree.
    pub(crate) fn same_as(&self, other: &Ty) -> bool {
        match (&self.kind, &other.kind) {
            (TyKind::Record(a), TyKind::Record(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }

    /// Strips any number of `Option` wrappers.
    pub(crate) fn non_null(&self) -> &Ty {
        match &self.kind {
            TyKind::Option(inner) => inner.non_null(),
            _ => self,
        }
    }

    pub(crate) fn scalar(&self) -> Option<&syn::Ident> {
        match &self.kind {
            TyKind::Scalar(ident) => Some(ident),
            _ => None,
        }
    }
}

impl TyKind {
    fn from_path(path: &syn::Path) -> Self {
        let Some(last) = path.segments.last() else {
            return TyKind::Other;
        };

        let name = last.ident.to_string();
        let type_args = type_args(&last.arguments);

        if path.segments.len() == 1 && SCALARS.contains(&name.as_str()) {
            return if last.arguments.is_none() {
                TyKind::Scalar(last.ident.clone())
            } else {
                TyKind::Other
            };
        }

        if let Some(container) = ContainerKind::from_name(&name) {
            let args = type_args.iter().map(|ty| TypeArg::from_ast(ty)).collect();
            return TyKind::Container { container, args };
        }

        match name.as_str() {
            "String" if last.arguments.is_none() => TyKind::Text,
            "Option" => match &type_args[..] {
                [inner] => TyKind::Option(Box::new(Ty::from_ast(inner))),
                _ => TyKind::Other,
            },
            "Box" => match &type_args[..] {
                [syn::Type::Slice(slice)] => TyKind::Slice(Box::new(Ty::from_ast(&slice.elem))),
                _ => TyKind::Other,
            },
            _ if is_std_path(path) || STD_TYPES.contains(&name.as_str()) => TyKind::Other,
            _ if !last.arguments.is_none() => TyKind::Other,
            _ => TyKind::Record(last.ident.clone()),
        }
    }
}

impl TypeArg {
    fn from_ast(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Infer(_)
            | syn::Type::ImplTrait(_)
            | syn::Type::TraitObject(_)
            | syn::Type::Macro(_) => TypeArg::Wildcard,
            syn::Type::Paren(ty) => Self::from_ast(&ty.elem),
            _ => TypeArg::Resolved(Ty::from_ast(ty)),
        }
    }

    pub(crate) fn resolved(&self) -> Option<&Ty> {
        match self {
            TypeArg::Resolved(ty) => Some(ty),
            TypeArg::Wildcard => None,
        }
    }
}

impl ContainerKind {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Vec" => Self::Vec,
            "VecDeque" => Self::VecDeque,
            "LinkedList" => Self::LinkedList,
            "BinaryHeap" => Self::BinaryHeap,
            "HashSet" => Self::HashSet,
            "BTreeSet" => Self::BTreeSet,
            "IndexSet" => Self::IndexSet,
            "HashMap" => Self::HashMap,
            "BTreeMap" => Self::BTreeMap,
            "IndexMap" => Self::IndexMap,
            _ => return None,
        })
    }

    pub(crate) fn family(self) -> ContainerFamily {
        match self {
            Self::Vec | Self::VecDeque | Self::LinkedList | Self::BinaryHeap => {
                ContainerFamily::Sequence
            }
            Self::HashSet | Self::BTreeSet | Self::IndexSet => ContainerFamily::Set,
            Self::HashMap | Self::BTreeMap | Self::IndexMap => ContainerFamily::Map,
        }
    }

    /// Number of element type arguments the container carries, not counting
    /// a hasher.
    pub(crate) fn arity(self) -> usize {
        match self.family() {
            ContainerFamily::Map => 2,
            _ => 1,
        }
    }
}

fn type_args(arguments: &syn::PathArguments) -> Vec<syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = arguments else {
        return vec![];
    };

    args.args
        .iter()
        .filter_map(|arg| match arg {
            syn::GenericArgument::Type(ty) => Some(ty.clone()),
            _ => None,
        })
        .collect()
}

fn is_std_path(path: &syn::Path) -> bool {
    path.segments.len() > 1
        && path
            .segments
            .first()
            .is_some_and(|first| STD_ROOTS.contains(&first.ident.to_string().as_str()))
}
