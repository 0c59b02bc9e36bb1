use console::Style;
use unsharp_core::config::FilterConfig;
use unsharp_core::filters::normalize::{normalize, Normalization};
use unsharp_core::filters::unsharp_mask::UnsharpParams;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_params(s: &Styles, params: &UnsharpParams) {
    println!(
        "  {:<14}{}  {}  {}",
        s.label.apply_to("Raw"),
        s.value.apply_to(format!("amount={}", params.amount)),
        s.value.apply_to(format!("radius={}", params.radius)),
        s.value.apply_to(format!("threshold={}", params.threshold)),
    );

    match normalize(params) {
        Normalization::Apply(n) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Gain"),
                s.value.apply_to(format!("{:.3}", n.amount))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Iterations"),
                s.value.apply_to(n.iterations)
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Threshold"),
                s.value.apply_to(n.threshold)
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Rounding"),
                s.method.apply_to(format!("{:?}", n.rounding))
            );
        }
        Normalization::NoOp(reason) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Effect"),
                s.disabled.apply_to(format!("disabled ({})", reason))
            );
        }
    }
}

pub fn print_unsharp_summary(params: &UnsharpParams) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Unsharp Mask"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    print_params(&s, params);
    println!();
}

pub fn print_run_summary(config: &FilterConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Unsharp Batch"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Steps"),
        s.method.apply_to(config.steps.join(" -> "))
    );

    for (name, params) in &config.presets {
        println!();
        println!("  {}", s.title.apply_to(name));
        print_params(&s, params);
    }
    println!();
}
