// Constants for the trace visualizer

/// Program shown when no source file is given
pub const SAMPLE_SOURCE: &str = "function bubbleSort(arr) {
  let n = arr.length;
  for (let i = 0; i < n - 1; i++) {
    for (let j = 0; j < n - i - 1; j++) {
      if (arr[j] > arr[j + 1]) {
        // Swap
        let temp = arr[j];
        arr[j] = arr[j + 1];
        arr[j + 1] = temp;
      }
    }
  }
  return arr;
}";

/// Default auto-advance interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
