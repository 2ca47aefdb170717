//! `pvsadm image`: PowerVS boot image management

use super::InstanceArgs;
use crate::cli::context::Context;
use crate::cli::registry::Executable;
use crate::cloud::Request;
use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches, Subcommand, ValueEnum};
use std::path::PathBuf;

pub struct Image;

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// Import the image into PowerVS instances
    Import(ImportArgs),
    /// Convert the qcow2 image to ova format
    Qcow2ova(Qcow2OvaArgs),
    /// Sync images between IBM COS buckets
    Sync(SyncArgs),
    /// Upload the image to the IBM COS
    Upload(UploadArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OsType {
    Aix,
    Ibmi,
    Redhat,
    Sles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageType {
    Tier1,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImageDist {
    Rhel,
    Centos,
    Coreos,
}

#[derive(Args, Debug)]
struct ImportArgs {
    #[command(flatten)]
    instance: InstanceArgs,

    /// Cloud Object Storage bucket name
    #[arg(short, long)]
    bucket: String,

    /// Cloud Object Storage object name
    #[arg(short, long)]
    object: String,

    /// Name to give the imported PowerVS image
    #[arg(long)]
    pvs_image_name: String,

    /// COS bucket region
    #[arg(short, long, default_value = "us-south")]
    region: String,

    /// Image operating system
    #[arg(long, value_enum, default_value_t = OsType::Redhat)]
    os_type: OsType,

    /// Storage tier of the imported image
    #[arg(long, value_enum, default_value_t = StorageType::Tier3)]
    storage_type: StorageType,
}

#[derive(Args, Debug)]
struct Qcow2OvaArgs {
    /// Name of the resulting OVA image
    #[arg(long)]
    image_name: String,

    /// URL or local path of the qcow2 image
    #[arg(long)]
    image_url: String,

    /// Distribution of the qcow2 image
    #[arg(long, value_enum, default_value_t = ImageDist::Rhel)]
    image_dist: ImageDist,

    /// Size of the OVA disk in GB
    #[arg(long, default_value_t = 120)]
    image_size: u32,

    /// Scratch directory for the conversion
    #[arg(short, long)]
    temp_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SyncArgs {
    /// YAML file listing source and destination buckets
    #[arg(short, long)]
    spec_yaml: PathBuf,
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// Cloud Object Storage bucket name
    #[arg(short, long)]
    bucket: String,

    /// Local file to upload
    #[arg(short, long)]
    file: PathBuf,

    /// Object name, defaults to the file name
    #[arg(short, long)]
    object_name: Option<String>,

    /// Cloud Object Storage instance name
    #[arg(long)]
    cos_instance_name: Option<String>,

    /// COS bucket region
    #[arg(short, long, default_value = "us-south")]
    region: String,
}

fn value_name(value: impl ValueEnum) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

impl Executable for Image {
    fn command(&self) -> Command {
        ImageCommands::augment_subcommands(
            Command::new("image").about("PowerVS Image management"),
        )
    }

    fn execute(&self, ctx: &Context, matches: &ArgMatches) -> Result<()> {
        let request = match ImageCommands::from_arg_matches(matches)? {
            ImageCommands::Import(args) => {
                ctx.require_api_key()?;
                Request::new("image import")
                    .instance(args.instance.instance()?)
                    .param("bucket", args.bucket)
                    .param("object", args.object)
                    .param("image_name", args.pvs_image_name)
                    .param("region", args.region)
                    .param("os_type", value_name(args.os_type))
                    .param("storage_type", value_name(args.storage_type))
            }
            // Local conversion, no IBM Cloud access
            ImageCommands::Qcow2ova(args) => {
                let mut request = Request::new("image qcow2ova")
                    .param("image_name", args.image_name)
                    .param("image_url", args.image_url)
                    .param("image_dist", value_name(args.image_dist))
                    .param("image_size", args.image_size);
                if let Some(dir) = args.temp_dir {
                    request = request.param("temp_dir", dir.display());
                }
                request
            }
            ImageCommands::Sync(args) => {
                ctx.require_api_key()?;
                Request::new("image sync").param("spec_yaml", args.spec_yaml.display())
            }
            ImageCommands::Upload(args) => {
                ctx.require_api_key()?;
                let object = match args.object_name {
                    Some(name) => name,
                    None => args
                        .file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                };
                let mut request = Request::new("image upload")
                    .param("bucket", args.bucket)
                    .param("file", args.file.display())
                    .param("object", object)
                    .param("region", args.region);
                if let Some(cos) = args.cos_instance_name {
                    request = request.param("cos_instance_name", cos);
                }
                request
            }
        };

        ctx.submit(request)
    }
}
