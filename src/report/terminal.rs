use crate::collect::ResourceCategory;
use crate::config::ReportConfig;
use crate::report::{format_size, AuditReport};
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored, sectioned output
pub struct TerminalReporter {
    config: ReportConfig,
}

impl TerminalReporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn report(&self, report: &AuditReport) -> Result<()> {
        println!();
        println!("{}", "APP SIZE AUDIT".bold());
        println!(
            "Scanning {} modules: {}",
            report.modules.len(),
            report.modules.join(", ")
        );
        println!("App module: {}", report.app_module.cyan());

        self.print_size_breakdown(report);
        self.print_resources(report);
        self.print_native_on_disk(report);
        self.print_native_in_package(report);
        self.print_unused_resources(report);
        self.print_unused_dependencies(report);
        self.print_suggestions(report);
        self.print_warnings(report);

        println!();
        Ok(())
    }

    fn section(&self, title: &str) {
        println!();
        println!("{}", title.yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    fn print_size_breakdown(&self, report: &AuditReport) {
        self.section("SIZE BREAKDOWN");

        let Some(package) = &report.package else {
            println!("{}", "No built artifact found. Build your app first for accurate size.".yellow());
            println!("   Run: ./gradlew {}:assembleDebug", report.app_module);
            return;
        };

        let sizes = &package.sizes;
        println!("{} {}", "Built artifact:".bold(), package.name);
        println!(
            "   Total size: {} ({} bytes)",
            format_size(sizes.total).bold(),
            sizes.total
        );

        let mut rows = vec![
            ("Code (DEX)", sizes.code),
            ("Resources", sizes.resources),
            ("Native Libs", sizes.native_libs),
            ("Assets", sizes.assets),
            ("Metadata (Manifest, Signatures)", sizes.metadata),
            ("Other", sizes.other),
        ];
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        println!();
        println!("   Composition:");
        for (label, size) in rows {
            if size == 0 {
                continue;
            }
            println!(
                "   - {:<32}: {:>10} ({:.1}%)",
                label,
                format_size(size),
                sizes.percent_of_total(size)
            );
        }
        if sizes.overhead > 0 {
            println!(
                "   - {:<32}: {:>10} ({:.1}%)",
                "Container overhead",
                format_size(sizes.overhead as u64),
                sizes.percent_of_total(sizes.overhead as u64)
            );
        } else if !sizes.is_consistent() {
            println!(
                "   {} entry sizes exceed the container size by {} bytes",
                "warning:".yellow(),
                -sizes.overhead
            );
        }
    }

    fn print_resources(&self, report: &AuditReport) {
        self.section("IMAGES & ASSETS");

        let scan = &report.resources;
        let categories = [
            ResourceCategory::Png,
            ResourceCategory::Jpeg,
            ResourceCategory::Webp,
            ResourceCategory::VectorDrawable,
            ResourceCategory::Animation,
            ResourceCategory::Font,
            ResourceCategory::Layout,
        ];

        for category in categories {
            println!(
                "{}: {} files ({})",
                category,
                scan.category_count(category),
                format_size(scan.category_size(category))
            );
        }
        println!(
            "Total scanned: {}",
            format_size(scan.total_size).bold()
        );

        let densities = scan.density_counts();
        if !densities.is_empty() {
            println!();
            println!("Density variants:");
            for (bucket, count) in densities {
                println!("   - {}: {} images", bucket, count);
            }
        }
    }

    fn print_native_on_disk(&self, report: &AuditReport) {
        if report.native_libs.is_empty() {
            return;
        }
        self.section("NATIVE LIBRARIES (.so files on disk)");

        println!(
            "Total: {} files ({})",
            report.native_libs.len(),
            format_size(report.native_libs_size())
        );

        let mut sorted: Vec<_> = report.native_libs.iter().collect();
        sorted.sort_by(|a, b| b.size.cmp(&a.size).then(a.path.cmp(&b.path)));
        for lib in sorted.iter().take(10) {
            println!("   - {}: {}", lib.name, format_size(lib.size));
        }
        if sorted.len() > 10 {
            println!("   ... and {} more", sorted.len() - 10);
        }
    }

    fn print_native_in_package(&self, report: &AuditReport) {
        let Some(package) = &report.package else {
            return;
        };
        if package.native_entries.is_empty() {
            return;
        }
        self.section("NATIVE LIBRARIES IN BUILT ARTIFACT");

        let total = package.native_total();
        println!(
            "Total: {} entries ({})",
            package.native_entries.len(),
            format_size(total)
        );

        println!();
        println!("By library:");
        let by_name = package.native_by_lib_name();
        let display_count = self.config.top_native_libs;
        for group in by_name.iter().take(display_count) {
            let percent = if total > 0 {
                group.size as f64 * 100.0 / total as f64
            } else {
                0.0
            };
            println!(
                "   - {:<45}: {:>10} ({:.1}%)",
                group.key,
                format_size(group.size),
                percent
            );
            if group.entries > 1 {
                println!("      {} architecture variants", group.entries);
            }
        }
        if by_name.len() > display_count {
            let remaining: u64 = by_name.iter().skip(display_count).map(|g| g.size).sum();
            println!(
                "   - ... and {} more libraries: {}",
                by_name.len() - display_count,
                format_size(remaining)
            );
        }

        println!();
        println!("By CPU architecture:");
        for group in package.native_by_arch() {
            let percent = if total > 0 {
                group.size as f64 * 100.0 / total as f64
            } else {
                0.0
            };
            println!(
                "   - {:<15}: {:>10} ({:.1}%) - {} files",
                group.key,
                format_size(group.size),
                percent,
                group.entries
            );
        }
    }

    fn print_unused_resources(&self, report: &AuditReport) {
        self.section("POTENTIALLY UNUSED RESOURCES");

        if report.unused_resources.is_empty() {
            println!("{}", "No unused image resources detected.".green());
            return;
        }

        println!(
            "{}",
            format!(
                "{} files with no textual reference ({})",
                report.unused_resources.len(),
                format_size(report.unused_resources_size())
            )
            .yellow()
        );
        for resource in report.unused_resources.iter().take(self.config.sample_files) {
            println!(
                "   {} {} ({})",
                "○".dimmed(),
                resource.path.display(),
                format_size(resource.size)
            );
        }
        if report.unused_resources.len() > self.config.sample_files {
            println!(
                "   ... and {} more files",
                report.unused_resources.len() - self.config.sample_files
            );
        }
        println!(
            "{}",
            "Note: matching is textual; dynamically named resources can be false positives."
                .dimmed()
        );
    }

    fn print_unused_dependencies(&self, report: &AuditReport) {
        let Some(catalog) = &report.catalog else {
            return;
        };
        self.section("UNUSED DEPENDENCIES IN VERSION CATALOG");

        if catalog.unused.is_empty() {
            println!(
                "{}",
                format!(
                    "All {} catalog dependencies are referenced from build scripts.",
                    catalog.declared
                )
                .green()
            );
            return;
        }

        println!(
            "Found {} of {} libraries defined but not used:",
            catalog.unused.len().to_string().yellow(),
            catalog.declared
        );
        println!();
        for dep in &catalog.unused {
            println!("   {} {}", "✗".red(), dep.alias.bold());
            println!("      Library: {}", dep.coordinate);
            println!("      Defined in: {}", dep.defined_in);
        }
    }

    fn print_suggestions(&self, report: &AuditReport) {
        self.section("OPTIMIZATION SUGGESTIONS");

        if report.suggestions.is_empty() {
            println!("{}", "Looking good! No major issues detected.".green());
            return;
        }
        for suggestion in &report.suggestions {
            println!("   • {}", suggestion);
        }
    }

    fn print_warnings(&self, report: &AuditReport) {
        if report.warnings.is_empty() {
            return;
        }
        println!();
        for warning in &report.warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
    }
}
