use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use voxreg_core::{AngleUnit, Point3, Spacing3, Tolerances, Transform};
use voxreg_io::{read_registry, read_transform, write_registry, write_transform};
use voxreg_registration::TransformRegistry;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Inspect and edit voxreg transform documents")]
struct Cli {
    /// Orthogonality tolerance used for rigidity checks
    #[arg(long, global = true, default_value_t = voxreg_core::config::DEFAULT_RIGID_TOLERANCE)]
    rigid_tolerance: f64,

    /// Determinant magnitude below which a matrix counts as singular
    #[arg(long, global = true, default_value_t = voxreg_core::config::DEFAULT_SINGULAR_EPSILON)]
    singular_epsilon: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of a registry document
    Inspect {
        registry: PathBuf,
    },

    /// Print the decomposition of a single transform document
    Decompose {
        transform: PathBuf,
    },

    /// Write the inverse of a transform document
    Invert {
        transform: PathBuf,

        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target space id of the inverse
        #[arg(long)]
        target: Option<String>,
    },

    /// Move the center of rotation without changing the mapping
    Recenter {
        transform: PathBuf,
        x: f64,
        y: f64,
        z: f64,

        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a registry holding the identity entry of a space
    Seed {
        space_id: String,
        output: PathBuf,

        /// Voxel counts, e.g. 512,512,120
        #[arg(long, value_delimiter = ',', default_values_t = [0usize, 0, 0])]
        size: Vec<usize>,

        /// Voxel spacing in mm, e.g. 0.7,0.7,2.5
        #[arg(long, value_delimiter = ',', default_values_t = [1.0f64, 1.0, 1.0])]
        spacing: Vec<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let tolerances = Tolerances::new()
        .with_rigid_tolerance(cli.rigid_tolerance)
        .with_singular_epsilon(cli.singular_epsilon);

    match cli.command {
        Commands::Inspect { registry } => inspect(&registry, &tolerances)?,
        Commands::Decompose { transform } => {
            let t = load_transform(&transform)?;
            print_transform(&t, &tolerances);
        }
        Commands::Invert { transform, output, target } => {
            invert(&transform, output.as_deref(), target, &tolerances)?
        }
        Commands::Recenter { transform, x, y, z, output } => {
            recenter(&transform, Point3::new([x, y, z]), output.as_deref())?
        }
        Commands::Seed {
            space_id,
            output,
            size,
            spacing,
        } => seed(&space_id, &output, &size, &spacing)?,
    }

    Ok(())
}

fn load_transform(path: &Path) -> Result<Transform> {
    read_transform(path).with_context(|| format!("Failed to read transform {}", path.display()))
}

fn inspect(path: &Path, tolerances: &Tolerances) -> Result<()> {
    let registry = read_registry(path)
        .with_context(|| format!("Failed to read registry {}", path.display()))?;

    println!(
        "Registry of '{}' ({} entries)",
        registry.reference_space_id(),
        registry.count()
    );
    for transform in registry.transforms() {
        println!();
        print_transform(transform, tolerances);
    }
    Ok(())
}

fn print_transform(transform: &Transform, tolerances: &Tolerances) {
    let name = if transform.name().is_empty() { "<unnamed>" } else { transform.name() };
    println!("  {} -> {}", name, transform.target_space_id());
    println!("    size         {:?}", transform.size());
    println!("    spacing      {:?}", transform.spacing().to_array());

    if let Some(field) = transform.displacement_field() {
        println!("    displacement field {}", field.file_name());
        return;
    }

    println!("    center       {:?}", transform.center().to_array());
    println!("    translations {:?}", transform.translations().to_array());
    println!("    offsets      {:?}", transform.offsets().to_array());
    println!("    identity     {}", transform.is_identity());
    println!("    rigid        {}", transform.is_rigid_with(tolerances));

    match transform.decompose_with(tolerances) {
        Ok(parts) => {
            println!("    rotation     {:?} deg", parts.rotation_in(AngleUnit::Degrees));
            println!("    zoom         {:?}", parts.zoom);
            println!("    shear        {:?}", parts.shear);
        }
        Err(e) => println!("    decomposition failed: {}", e),
    }
}

fn invert(
    path: &Path,
    output: Option<&Path>,
    target: Option<String>,
    tolerances: &Tolerances,
) -> Result<()> {
    let transform = load_transform(path)?;
    let mut inverse = transform
        .inverse_with(tolerances)
        .with_context(|| format!("Cannot invert {}", path.display()))?;
    if let Some(target) = target {
        inverse.set_target_space_id(target);
    }

    let output = output.unwrap_or(path);
    write_transform(output, &inverse)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Inverse written to {}", output.display());
    Ok(())
}

fn recenter(path: &Path, center: Point3, output: Option<&Path>) -> Result<()> {
    let transform = load_transform(path)?;
    let recentered = transform
        .with_center_of_rotation(center)
        .with_context(|| format!("Cannot recenter {}", path.display()))?;

    let output = output.unwrap_or(path);
    write_transform(output, &recentered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Center moved to {:?}, translations now {:?}",
        center.to_array(),
        recentered.translations().to_array()
    );
    Ok(())
}

fn seed(space_id: &str, output: &Path, size: &[usize], spacing: &[f64]) -> Result<()> {
    let size: [usize; 3] = size
        .try_into()
        .map_err(|_| anyhow::anyhow!("--size needs 3 values"))?;
    let spacing = Spacing3::from_slice(spacing).context("--spacing needs 3 values")?;
    if !spacing.is_valid() {
        anyhow::bail!("Spacing must be finite and positive: {:?}", spacing.to_array());
    }

    let mut registry = TransformRegistry::new(space_id);
    registry.seed_identity(size, spacing);
    write_registry(output, &registry)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Seeded registry of '{}' at {}", space_id, output.display());
    Ok(())
}
