use std::fmt;

/// Kind of a software component, as enumerated by CycloneDX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    Platform,
    OperatingSystem,
    Device,
    DeviceDriver,
    Firmware,
    File,
    MachineLearningModel,
    Data,
    CryptographicAsset,
    /// Anything the enumeration does not know about
    Other,
}

impl ComponentType {
    /// Parses a CycloneDX component type. Unknown values map to [`ComponentType::Other`].
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "platform" => Self::Platform,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "device-driver" => Self::DeviceDriver,
            "firmware" => Self::Firmware,
            "file" => Self::File,
            "machine-learning-model" => Self::MachineLearningModel,
            "data" => Self::Data,
            "cryptographic-asset" => Self::CryptographicAsset,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Container => "container",
            Self::Platform => "platform",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::DeviceDriver => "device-driver",
            Self::Firmware => "firmware",
            Self::File => "file",
            Self::MachineLearningModel => "machine-learning-model",
            Self::Data => "data",
            Self::CryptographicAsset => "cryptographic-asset",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component value object - one entry of the SBOM component list.
///
/// `bom_ref` is the graph key: it is unique within a single BOM and is the
/// only field the dependency graph engine looks at to wire edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub bom_ref: String,
    pub name: String,
    pub group: Option<String>,
    pub version: String,
    pub description: Option<String>,
    pub component_type: ComponentType,
    pub purl: Option<String>,
}

impl Component {
    pub fn new(
        bom_ref: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            name: name.into(),
            group: None,
            version: version.into(),
            description: None,
            component_type,
            purl: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// `group/name@version`, omitting the parts that are absent
    pub fn coordinates(&self) -> String {
        let mut out = String::new();
        if let Some(group) = self.group.as_deref().filter(|g| !g.is_empty()) {
            out.push_str(group);
            out.push('/');
        }
        out.push_str(&self.name);
        if !self.version.is_empty() {
            out.push('@');
            out.push_str(&self.version);
        }
        out
    }
}
