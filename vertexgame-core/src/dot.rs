use crate::graph::GraphState;
use alloc::format;
use alloc::string::String;
use core::fmt::Write;

impl GraphState {
    /// Puts graph into dot language for visualization
    #[must_use]
    pub fn plot_dot(&self) -> String {
        let mut res = String::from("strict digraph {\n  ordering=in\n  rank=source\n");
        let mut add_node = |name: String, shape: &str, fillcolor: &str| {
            let _ = writeln!(
                res,
                "  {name}[label=\"{name}\", shape={shape}, fillcolor=\"{fillcolor}\", style=filled]"
            );
        };
        for i in 1..=self.num_inputs() {
            add_node(format!("x{i}"), "box", "lightgreen");
        }
        for v in 1..=self.num_vertices() {
            let fillcolor = if self.is_eliminated(v) {
                "grey"
            } else if self.is_output(v) {
                "lightcoral"
            } else {
                "lightblue"
            };
            let shape = if self.is_output(v) { "doublecircle" } else { "oval" };
            add_node(format!("v{v}"), shape, fillcolor);
        }
        for (from, to, edge) in self.edges() {
            let _ = writeln!(
                res,
                "  {from} -> v{to}[label=\"{}\\n{}\"]",
                edge.sparsity(),
                edge.shape()
            );
        }
        res.push('}');
        res
    }
}
