/// Raw declarative metadata for one command handler, exactly as its author wrote it.
///
/// Nothing here is validated or normalised yet; that happens when a
/// [`CommandDescriptor`](super::descriptor::CommandDescriptor) is built from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandMetadata {
    /// Main name for the command.
    pub name: String,
    /// Alternative names, usually shorthand versions of the name.
    pub aliases: Vec<String>,
    /// Usage syntax without the command name. Empty when none was supplied.
    pub usage: String,
    /// Empty when none was supplied.
    pub description: String,
    /// If only interactive player sessions may run this command.
    pub player_only: bool,
    pub min_args: i32,
    /// `-1` means there is no upper bound.
    pub max_args: i32,
    /// Supported flags without the leading dash. A trailing `:` marks a flag that takes a value.
    pub flags: Vec<String>,
    /// Any one of these permissions allows use of the command. Empty means anyone may use it.
    pub permissions: Vec<String>,
}

impl CommandMetadata {
    pub fn builder(name: &str) -> CommandMetadataBuilder {
        CommandMetadataBuilder::new(name)
    }
}

/// Builder utility structure to create a [CommandMetadata] record.
pub struct CommandMetadataBuilder {
    name: String,
    aliases: Vec<String>,
    usage: String,
    description: String,
    player_only: bool,
    min_args: i32,
    max_args: i32,
    flags: Vec<String>,
    permissions: Vec<String>,
}
impl CommandMetadataBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            aliases: vec![],
            usage: String::new(),
            description: String::new(),
            player_only: false,
            min_args: 0,
            max_args: -1,
            flags: vec![],
            permissions: vec![],
        }
    }

    pub fn build(&self) -> CommandMetadata {
        CommandMetadata {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            usage: self.usage.clone(),
            description: self.description.clone(),
            player_only: self.player_only,
            min_args: self.min_args,
            max_args: self.max_args,
            flags: self.flags.clone(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn alias(&mut self, alias: &str) -> &mut Self {
        self.aliases.push(alias.to_owned());
        self
    }

    pub fn aliases(&mut self, aliases: &[&str]) -> &mut Self {
        self.aliases.extend(aliases.iter().map(|&a| a.to_owned()));
        self
    }

    pub fn usage(&mut self, usage: &str) -> &mut Self {
        usage.clone_into(&mut self.usage);
        self
    }

    pub fn description(&mut self, description: &str) -> &mut Self {
        description.clone_into(&mut self.description);
        self
    }

    pub fn player_only(&mut self, player_only: bool) -> &mut Self {
        self.player_only = player_only;
        self
    }

    pub fn min_args(&mut self, min_args: i32) -> &mut Self {
        self.min_args = min_args;
        self
    }

    pub fn max_args(&mut self, max_args: i32) -> &mut Self {
        self.max_args = max_args;
        self
    }

    pub fn flag(&mut self, flag: &str) -> &mut Self {
        self.flags.push(flag.to_owned());
        self
    }

    pub fn flags(&mut self, flags: &[&str]) -> &mut Self {
        self.flags.extend(flags.iter().map(|&f| f.to_owned()));
        self
    }

    pub fn permission(&mut self, permission: &str) -> &mut Self {
        self.permissions.push(permission.to_owned());
        self
    }

    pub fn permissions(&mut self, permissions: &[&str]) -> &mut Self {
        self.permissions.extend(permissions.iter().map(|&p| p.to_owned()));
        self
    }
}
