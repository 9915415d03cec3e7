// ============================================================
// Layer 5 — Placement DNN Architecture
// ============================================================
// A plain feed-forward binary classifier:
//
//   features [batch, input_dim]
//     → Linear → ReLU   (one block per hidden_dims entry)
//     → Linear(…, 1)
//     → sigmoid          [batch, 1], every value in [0, 1]
//
// Only the architecture lives here. The weights come from the
// record file in the artifacts directory (see infra::checkpoint).

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct PlacementDnnConfig {
    /// Width of the preprocessed feature vector
    pub input_dim:   usize,
    /// Width of each hidden layer, input side first
    pub hidden_dims: Vec<usize>,
}

impl PlacementDnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PlacementDnn<B> {
        let mut hidden = Vec::with_capacity(self.hidden_dims.len());
        let mut width  = self.input_dim;
        for &next in &self.hidden_dims {
            hidden.push(LinearConfig::new(width, next).init(device));
            width = next;
        }
        let output = LinearConfig::new(width, 1).init(device);
        PlacementDnn { hidden, output }
    }
}

#[derive(Module, Debug)]
pub struct PlacementDnn<B: Backend> {
    pub hidden: Vec<Linear<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> PlacementDnn<B> {
    /// features: [batch, input_dim] → probabilities: [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = features;
        for layer in &self.hidden {
            x = relu(layer.forward(x));
        }
        sigmoid(self.output.forward(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_forward_shape_and_range() {
        let device = Default::default();
        let model: PlacementDnn<TestBackend> =
            PlacementDnnConfig::new(21, vec![16, 8]).init(&device);
        assert_eq!(model.hidden.len(), 2);

        let x = Tensor::<TestBackend, 2>::random(
            [4, 21],
            burn::tensor::Distribution::Uniform(-3.0, 3.0),
            &device,
        );
        let y = model.forward(x);
        assert_eq!(y.dims(), [4, 1]);

        let probs = y.into_data().to_vec::<f32>().unwrap();
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let cfg  = PlacementDnnConfig::new(21, vec![32, 16]);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PlacementDnnConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.input_dim, 21);
        assert_eq!(back.hidden_dims, vec![32, 16]);
    }
}
